//! Configuration file loading for quorum-debate
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DEBATE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./debate.toml` or `./.debate.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/quorum-debate/config.toml`
//! 5. Default values
//!
//! CLI flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDebateConfig, FileOutputConfig, FileParticipant,
    FileProviderConfig, FileReplConfig, FileRoleConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
