//! Conversation files: markdown records, JSON data and the live transcript.
//!
//! ```text
//! conversations/<id>.md        role: content
//! conversations_data/<id>.json [{"role": "...", "content": "..."}]
//! TRANSCRIPT.md                ## role:\ncontent\n\n   (rewritten every turn)
//! ```
//!
//! Ids are plain integers; only numerically named files are ever cleared.

use debate_domain::{ConversationHistory, Message};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not encode conversation: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No saved conversation with id {0}")]
    NotFound(String),
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Where each conversation file lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub conversations_dir: PathBuf,
    pub data_dir: PathBuf,
    pub active_transcript: PathBuf,
    pub system_prompt_file: PathBuf,
    pub user_input_file: PathBuf,
}

impl StorageLayout {
    /// Default layout rooted at `root`
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            conversations_dir: root.join("conversations"),
            data_dir: root.join("conversations_data"),
            active_transcript: root.join("TRANSCRIPT.md"),
            system_prompt_file: root.join("SYSTEM.md"),
            user_input_file: root.join("USER_INPUT.txt"),
        }
    }
}

/// Reads and writes conversation files for the interactive mode
#[derive(Debug, Clone)]
pub struct ConversationStore {
    layout: StorageLayout,
}

impl ConversationStore {
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    /// Write `<conversations_dir>/<id>.md` with one `role: content` line per message
    pub fn save_markdown(
        &self,
        conversation: &ConversationHistory,
        id: u64,
    ) -> Result<PathBuf, StoreError> {
        let path = self.layout.conversations_dir.join(format!("{}.md", id));
        let mut text = String::new();
        for message in conversation.messages() {
            text.push_str(&format!("{}: {}\n", message.role, message.content));
        }
        write_creating_dirs(&path, &text)?;
        debug!("Conversation saved to {}", path.display());
        Ok(path)
    }

    /// Write `<data_dir>/<id>.json` so the conversation can be reloaded
    pub fn save_data(
        &self,
        conversation: &ConversationHistory,
        id: u64,
    ) -> Result<PathBuf, StoreError> {
        let path = self.layout.data_dir.join(format!("{}.json", id));
        let json = serde_json::to_string_pretty(conversation.messages())?;
        write_creating_dirs(&path, &json)?;
        debug!("Conversation data saved to {}", path.display());
        Ok(path)
    }

    /// Reload a conversation saved with [`save_data`](Self::save_data)
    pub fn load_data(&self, id: &str) -> Result<ConversationHistory, StoreError> {
        let id = id.trim();
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let path = self.layout.data_dir.join(format!("{}.json", id));
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_string()));
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };
        let messages: Vec<Message> = serde_json::from_str(&text)?;
        Ok(ConversationHistory::from(messages))
    }

    /// Rewrite the active transcript with `## role:` headings
    pub fn write_active(&self, conversation: &ConversationHistory) -> Result<(), StoreError> {
        let mut text = String::new();
        for message in conversation.messages() {
            text.push_str(&format!("## {}:\n{}\n\n", message.role, message.content));
        }
        write_creating_dirs(&self.layout.active_transcript, &text)
    }

    /// Truncate the active transcript
    pub fn clear_active(&self) -> Result<(), StoreError> {
        write_creating_dirs(&self.layout.active_transcript, "")
    }

    /// Delete numerically named files from both conversation directories.
    ///
    /// Returns how many files were removed. Missing directories count as empty.
    pub fn clear_saved(&self) -> Result<usize, StoreError> {
        let mut removed = 0;
        for dir in [&self.layout.conversations_dir, &self.layout.data_dir] {
            removed += clear_numbered_files(dir)?;
        }
        Ok(removed)
    }

    /// First id at or after `start` with no saved markdown record
    pub fn next_conversation_id(&self, start: u64) -> u64 {
        let mut id = start;
        while self
            .layout
            .conversations_dir
            .join(format!("{}.md", id))
            .is_file()
        {
            id += 1;
        }
        id
    }

    /// Shared system prompt, trimmed; empty when the file is absent
    pub fn load_system_prompt(&self) -> String {
        read_trimmed(&self.layout.system_prompt_file)
    }

    /// Canned user prompt, trimmed; empty when the file is absent
    pub fn read_user_input(&self) -> String {
        read_trimmed(&self.layout.user_input_file)
    }
}

fn write_creating_dirs(path: &Path, contents: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| StoreError::io(path, e))
}

fn clear_numbered_files(dir: &Path) -> Result<usize, StoreError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(StoreError::io(dir, e)),
    };

    let mut removed = 0;
    for entry in entries {
        let path = entry.map_err(|e| StoreError::io(dir, e))?.path();
        let numbered = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit()));
        if path.is_file() && numbered {
            fs::remove_file(&path).map_err(|e| StoreError::io(&path, e))?;
            removed += 1;
        }
    }
    Ok(removed)
}

fn read_trimmed(path: &Path) -> String {
    if !path.is_file() {
        return String::new();
    }
    match fs::read_to_string(path) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("Error reading {}: {}", path.display(), e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ConversationStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ConversationStore::new(StorageLayout::under(dir.path()));
        (dir, store)
    }

    fn conversation() -> ConversationHistory {
        let mut history = ConversationHistory::new();
        history.push(Message::system("Be brief."));
        history.push_user("Capital of France?");
        history.push_assistant("## FINAL ANSWER\nParis");
        history
    }

    #[test]
    fn test_save_markdown() {
        let (_dir, store) = store();
        let path = store.save_markdown(&conversation(), 0).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(text.starts_with("system: Be brief.\nuser: Capital of France?\n"));
        assert!(text.ends_with("assistant: ## FINAL ANSWER\nParis\n"));
    }

    #[test]
    fn test_save_and_load_data() {
        let (_dir, store) = store();
        store.save_data(&conversation(), 3).unwrap();

        let loaded = store.load_data(" 3 ").unwrap();
        assert_eq!(loaded, conversation());
        assert_eq!(loaded.system_prompt(), Some("Be brief."));
    }

    #[test]
    fn test_load_unknown_id() {
        let (_dir, store) = store();
        assert!(matches!(store.load_data("7"), Err(StoreError::NotFound(ref id)) if id == "7"));
        assert!(matches!(store.load_data("../x"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_active_transcript() {
        let (_dir, store) = store();
        store.write_active(&conversation()).unwrap();
        let text = fs::read_to_string(&store.layout().active_transcript).unwrap();
        assert!(text.starts_with("## system:\nBe brief.\n\n## user:\nCapital of France?\n\n"));

        store.clear_active().unwrap();
        assert_eq!(
            fs::read_to_string(&store.layout().active_transcript).unwrap(),
            ""
        );
    }

    #[test]
    fn test_next_conversation_id_skips_existing() {
        let (_dir, store) = store();
        assert_eq!(store.next_conversation_id(0), 0);

        store.save_markdown(&conversation(), 0).unwrap();
        store.save_markdown(&conversation(), 1).unwrap();
        assert_eq!(store.next_conversation_id(0), 2);
        assert_eq!(store.next_conversation_id(5), 5);
    }

    #[test]
    fn test_clear_saved_keeps_named_files() {
        let (_dir, store) = store();
        store.save_markdown(&conversation(), 0).unwrap();
        store.save_data(&conversation(), 0).unwrap();
        let notes = store.layout().conversations_dir.join("notes.md");
        fs::write(&notes, "keep me").unwrap();

        assert_eq!(store.clear_saved().unwrap(), 2);
        assert!(notes.exists());
        assert_eq!(store.next_conversation_id(0), 0);
    }

    #[test]
    fn test_clear_saved_without_directories() {
        let (_dir, store) = store();
        assert_eq!(store.clear_saved().unwrap(), 0);
    }

    #[test]
    fn test_prompt_files() {
        let (_dir, store) = store();
        assert_eq!(store.load_system_prompt(), "");
        assert_eq!(store.read_user_input(), "");

        fs::write(&store.layout().system_prompt_file, "\n  Answer in French.\n").unwrap();
        fs::write(&store.layout().user_input_file, "What is 2+2?\n").unwrap();
        assert_eq!(store.load_system_prompt(), "Answer in French.");
        assert_eq!(store.read_user_input(), "What is 2+2?");
    }
}
