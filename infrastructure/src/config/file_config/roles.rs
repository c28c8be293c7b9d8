//! Judge and writer configuration from TOML (`[judge]` / `[writer]` sections)

use debate_domain::{ConfigIssue, ConfigIssueCode, Participant, Severity};
use serde::{Deserialize, Serialize};

/// Raw configuration of a single non-debating agent
///
/// Unset fields fall back to the built-in judge or writer.
///
/// # Example
///
/// ```toml
/// [judge]
/// label = "The Judge"
/// model = "o3"
///
/// [writer]
/// model = "gpt-4.1"      # label keeps its default
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoleConfig {
    pub label: Option<String>,
    pub model: Option<String>,
}

impl FileRoleConfig {
    /// Parse into a [`Participant`], collecting issues for blank fields.
    pub fn parse(
        &self,
        section: &str,
        default: &Participant,
    ) -> (Option<Participant>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let label = self.label.as_deref().unwrap_or(&default.label);
        if label.trim().is_empty() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::EmptyLabel {
                    field: format!("{}.label", section),
                },
                message: format!("{}.label: label cannot be empty", section),
            });
        }

        let model = self.model.as_deref().unwrap_or(default.model.as_str());
        if model.trim().is_empty() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::EmptyModelName {
                    field: format!("{}.model", section),
                },
                message: format!("{}.model: model name cannot be empty", section),
            });
        }

        if issues.is_empty() {
            (Some(Participant::new(label, model)), issues)
        } else {
            (None, issues)
        }
    }
}
