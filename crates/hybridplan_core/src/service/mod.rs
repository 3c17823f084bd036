//! Use-case services composed from repositories.
//!
//! # Responsibility
//! - Orchestrate multi-repository flows without touching storage directly.
//! - Keep external collaborators (completion clients) behind traits.

pub mod chat_service;
