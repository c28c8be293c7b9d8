//! On-disk persistence of the outer conversation.

mod conversation_store;

pub use conversation_store::{ConversationStore, StorageLayout, StoreError};
