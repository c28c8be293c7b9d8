//! Conversation storage configuration from TOML (`[storage]` section)

use crate::storage::StorageLayout;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw storage configuration from TOML
///
/// Relative paths resolve against the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Directory for `<id>.md` conversation records
    pub conversations_dir: String,
    /// Directory for `<id>.json` conversation data
    pub data_dir: String,
    /// File rewritten with the live conversation after every session
    pub active_transcript: String,
    /// System prompt shared by every agent
    pub system_prompt_file: String,
    /// Canned prompt read by the `/i` command
    pub user_input_file: String,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            conversations_dir: "conversations".to_string(),
            data_dir: "conversations_data".to_string(),
            active_transcript: "TRANSCRIPT.md".to_string(),
            system_prompt_file: "SYSTEM.md".to_string(),
            user_input_file: "USER_INPUT.txt".to_string(),
        }
    }
}

impl FileStorageConfig {
    pub fn to_layout(&self) -> StorageLayout {
        StorageLayout {
            conversations_dir: PathBuf::from(&self.conversations_dir),
            data_dir: PathBuf::from(&self.data_dir),
            active_transcript: PathBuf::from(&self.active_transcript),
            system_prompt_file: PathBuf::from(&self.system_prompt_file),
            user_input_file: PathBuf::from(&self.user_input_file),
        }
    }
}
