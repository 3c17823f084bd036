//! Assistant chat flow composed above the repositories.
//!
//! # Responsibility
//! - Record the user's message, ask an external completion client for a
//!   reply, and record the reply as the assistant's message.
//! - Build completion context from the current events, notes and a raw
//!   survey-data blob, read through list operations only.
//!
//! # Invariants
//! - The completion call runs outside any store transaction.
//! - A failed completion still yields an assistant message (the error
//!   text); it is not surfaced as a service error.
//! - A user message is only recorded once its context could be built.
//! - Events and notes are never written by this flow.

use crate::model::chat::{ChatMessage, ChatRole};
use crate::model::validation::MAX_TEXT_CHARS;
use crate::repo::chat_repo::ChatRepository;
use crate::repo::error::RepoError;
use crate::repo::event_repo::EventRepository;
use crate::repo::note_repo::NoteRepository;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Prompt material handed to the completion client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Current events, notes and survey data rendered as text.
    pub context: String,
    pub user_message: String,
}

/// Failure reported by a completion client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionError {
    pub message: String,
}

impl CompletionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for CompletionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CompletionError {}

/// External text-completion collaborator (language-model vendor call).
pub trait CompletionClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

#[derive(Debug)]
pub enum ChatServiceError {
    Repo(RepoError),
    /// Context documents could not be rendered.
    Context(serde_json::Error),
}

impl Display for ChatServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Context(err) => write!(f, "failed to render chat context: {err}"),
        }
    }
}

impl Error for ChatServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Context(err) => Some(err),
        }
    }
}

impl From<RepoError> for ChatServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Chat use-case service over chat, events and notes repositories.
pub struct ChatService<C: ChatRepository, E: EventRepository, N: NoteRepository> {
    chat: C,
    events: E,
    notes: N,
}

impl<C: ChatRepository, E: EventRepository, N: NoteRepository> ChatService<C, E, N> {
    pub fn new(chat: C, events: E, notes: N) -> Self {
        Self {
            chat,
            events,
            notes,
        }
    }

    /// Appends `text` as a user message, then the assistant's reply.
    ///
    /// Returns the full transcript after both appends. Context is read
    /// before anything is appended, so a read failure leaves the transcript
    /// untouched.
    pub fn ask(
        &self,
        client: &dyn CompletionClient,
        text: &str,
        survey_data: &str,
    ) -> Result<Vec<ChatMessage>, ChatServiceError> {
        let request = CompletionRequest {
            context: self.build_context(survey_data)?,
            user_message: text.to_string(),
        };
        self.chat.append_message(ChatRole::User, text)?;

        let started_at = Instant::now();
        let reply = match client.complete(&request) {
            Ok(reply) => {
                info!(
                    "event=chat_completion module=service status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                reply
            }
            Err(err) => {
                warn!(
                    "event=chat_completion module=service status=error duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                format!("Error: {err}")
            }
        };

        let reply = truncate_chars(&reply, MAX_TEXT_CHARS);
        Ok(self.chat.append_message(ChatRole::Assistant, &reply)?)
    }

    /// Renders events, notes and survey data into one context block.
    pub fn build_context(&self, survey_data: &str) -> Result<String, ChatServiceError> {
        let events = self.events.list_events()?;
        let notes = self.notes.list_notes()?;
        let events_json =
            serde_json::to_string_pretty(&events).map_err(ChatServiceError::Context)?;
        let notes_json = serde_json::to_string_pretty(&notes).map_err(ChatServiceError::Context)?;

        Ok(format!(
            "Calendar events by day:\n{events_json}\n\nNotes:\n{notes_json}\n\nSurvey data:\n{}",
            survey_data.trim()
        ))
    }
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
