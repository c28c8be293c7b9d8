//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain types once
//! validated.

mod debate;
mod output;
mod provider;
mod repl;
mod roles;
mod storage;

pub use debate::{FileDebateConfig, FileParticipant};
pub use output::FileOutputConfig;
pub use provider::FileProviderConfig;
pub use repl::FileReplConfig;
pub use roles::FileRoleConfig;
pub use storage::FileStorageConfig;

use debate_domain::{ConfigIssue, ConfigIssueCode, DebateConfig, DomainError, Severity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration that cannot be turned into a [`DebateConfig`]
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Roster and round cap
    pub debate: FileDebateConfig,
    /// Agent that adjudicates the transcript
    pub judge: FileRoleConfig,
    /// Agent that writes the user-facing answer
    pub writer: FileRoleConfig,
    /// Chat-completions endpoint settings
    pub provider: FileProviderConfig,
    /// Conversation files
    pub storage: FileStorageConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks blank labels and models, duplicate labels, an empty roster,
    /// a zero round cap and a zero request timeout.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let defaults = DebateConfig::default();
        let mut issues = Vec::new();

        issues.extend(self.debate.parse_roster().1);
        issues.extend(self.debate.max_rounds_issues());
        issues.extend(self.judge.parse("judge", &defaults.judge).1);
        issues.extend(self.writer.parse("writer", &defaults.writer).1);

        if self.provider.timeout_seconds == 0 {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::InvalidTimeout,
                message: "provider.timeout_seconds: timeout cannot be 0".to_string(),
            });
        }

        issues
    }

    /// Build the immutable [`DebateConfig`] for a session.
    ///
    /// Fails when [`validate`](Self::validate) reports any error-level issue.
    pub fn to_debate_config(&self) -> Result<DebateConfig, ConfigValidationError> {
        let errors: Vec<String> = self
            .validate()
            .into_iter()
            .filter(|issue| issue.severity == Severity::Error)
            .map(|issue| issue.message)
            .collect();
        if !errors.is_empty() {
            return Err(ConfigValidationError::Invalid(errors));
        }

        let defaults = DebateConfig::default();
        let (Some(roster), _) = self.debate.parse_roster() else {
            return Err(DomainError::NoParticipants.into());
        };
        let judge = self.judge.parse("judge", &defaults.judge).0.unwrap_or(defaults.judge);
        let writer = self
            .writer
            .parse("writer", &defaults.writer)
            .0
            .unwrap_or(defaults.writer);

        let config = DebateConfig::new(roster)
            .with_judge(judge)
            .with_writer(writer)
            .with_max_rounds(self.debate.effective_max_rounds());
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[debate]
max_rounds = 4
participants = [
    { label = "Atlas", model = "gpt-5" },
    { label = "Boreas", model = "gpt-4o" },
]

[judge]
label = "Arbiter"
model = "o3-pro"

[writer]
model = "gpt-4.1"

[provider]
base_url = "http://localhost:11434"
api_key_env = "LOCAL_KEY"
timeout_seconds = 60

[output]
format = "full"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/quorum-debate/history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.debate.max_rounds, 4);
        assert_eq!(config.debate.participants.len(), 2);
        assert_eq!(config.judge.label.as_deref(), Some("Arbiter"));
        assert_eq!(config.provider.api_key_env, "LOCAL_KEY");
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);

        let debate = config.to_debate_config().unwrap();
        assert_eq!(debate.roster.labels(), vec!["Atlas", "Boreas"]);
        assert_eq!(debate.judge.label, "Arbiter");
        assert_eq!(debate.judge.model.as_str(), "o3-pro");
        assert_eq!(debate.writer.label, "The Writer");
        assert_eq!(debate.writer.model.as_str(), "gpt-4.1");
        assert_eq!(debate.max_rounds, 4);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[debate]
max_rounds = 2
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.debate.participants.len(), 3);
        assert!(config.output.color);
        assert!(config.repl.show_progress);
        assert_eq!(config.to_debate_config().unwrap().max_rounds, 2);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.to_debate_config().unwrap(), DebateConfig::default());
    }

    #[test]
    fn test_zero_rounds_warns_and_clamps() {
        let toml_str = r#"
[debate]
max_rounds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::ZeroRounds);
        assert_eq!(config.to_debate_config().unwrap().max_rounds, 1);
    }

    #[test]
    fn test_errors_abort_conversion() {
        let toml_str = r#"
[debate]
participants = [{ label = "Atlas", model = "" }]

[provider]
timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::EmptyModelName { field } if field == "debate.participants[0]"
        )));
        assert!(issues.iter().any(|i| i.code == ConfigIssueCode::InvalidTimeout));

        let err = config.to_debate_config().unwrap_err();
        assert!(matches!(err, ConfigValidationError::Invalid(ref messages) if messages.len() == 2));
    }
}
