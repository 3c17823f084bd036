//! Chat transcript repository: list and single-message append.

use crate::model::chat::{ChatDocument, ChatMessage, ChatRole};
use crate::repo::error::RepoResult;
use crate::store::{DocumentBackend, DocumentStore};
use log::info;

/// Repository interface for the chat transcript.
pub trait ChatRepository {
    fn list_messages(&self) -> RepoResult<Vec<ChatMessage>>;
    /// Appends one message and returns the full transcript.
    fn append_message(&self, role: ChatRole, text: &str) -> RepoResult<Vec<ChatMessage>>;
}

pub struct StoreChatRepository<'store, B: DocumentBackend> {
    store: &'store DocumentStore<B>,
}

impl<'store, B: DocumentBackend> StoreChatRepository<'store, B> {
    pub fn new(store: &'store DocumentStore<B>) -> Self {
        Self { store }
    }
}

impl<B: DocumentBackend> ChatRepository for StoreChatRepository<'_, B> {
    fn list_messages(&self) -> RepoResult<Vec<ChatMessage>> {
        Ok(self.store.load::<ChatDocument>()?.messages)
    }

    fn append_message(&self, role: ChatRole, text: &str) -> RepoResult<Vec<ChatMessage>> {
        let message = ChatMessage::new(role, text);
        message.validate()?;

        self.store.transact(|document: &mut ChatDocument| {
            document.messages.push(message);
            info!(
                "event=chat_append module=repo status=ok role={} count={}",
                role.as_str(),
                document.messages.len()
            );
            Ok(document.messages.clone())
        })
    }
}
