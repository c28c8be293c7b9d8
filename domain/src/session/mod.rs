//! Conversation domain.
//!
//! - [`entities::Message`] - a single role-tagged message
//! - [`entities::ConversationHistory`] - the append-only history one agent sees

pub mod entities;
