//! Infrastructure layer for quorum-debate
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading and
//! conversation storage.

pub mod config;
pub mod logging;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileOutputConfig, FileProviderConfig,
    FileReplConfig, FileStorageConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{OpenAiCompatibleGateway, OpenAiSettings};
pub use storage::{ConversationStore, StorageLayout, StoreError};
