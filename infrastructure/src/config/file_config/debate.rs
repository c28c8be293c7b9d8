//! Debate configuration from TOML (`[debate]` section)

use debate_domain::{ConfigIssue, ConfigIssueCode, DebateConfig, Participant, Roster, Severity};
use serde::{Deserialize, Serialize};

/// A single debater entry
///
/// ```toml
/// participants = [
///     { label = "GPT-5", model = "gpt-5" },
///     { label = "GPT-4o", model = "gpt-4o" },
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileParticipant {
    pub label: String,
    pub model: String,
}

impl From<&Participant> for FileParticipant {
    fn from(participant: &Participant) -> Self {
        Self {
            label: participant.label.clone(),
            model: participant.model.to_string(),
        }
    }
}

/// Raw debate configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Maximum number of debate rounds, round 1 included
    pub max_rounds: u32,
    /// Debaters in polling order
    pub participants: Vec<FileParticipant>,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            max_rounds: DebateConfig::DEFAULT_MAX_ROUNDS,
            participants: Roster::default().iter().map(FileParticipant::from).collect(),
        }
    }
}

impl FileDebateConfig {
    /// Round cap, raised to 1 when configured as 0
    pub fn effective_max_rounds(&self) -> u32 {
        self.max_rounds.max(1)
    }

    /// Parse the participant list into a [`Roster`], collecting issues.
    ///
    /// Entries with a blank label or model are skipped and reported; a
    /// repeated label (compared ignoring case) keeps the first entry.
    pub fn parse_roster(&self) -> (Option<Roster>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut participants: Vec<Participant> = Vec::new();

        for (index, entry) in self.participants.iter().enumerate() {
            let field = format!("debate.participants[{}]", index);
            if entry.label.trim().is_empty() {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::EmptyLabel {
                        field: field.clone(),
                    },
                    message: format!("{}: label cannot be empty", field),
                });
                continue;
            }
            if entry.model.trim().is_empty() {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::EmptyModelName {
                        field: field.clone(),
                    },
                    message: format!("{}: model name cannot be empty", field),
                });
                continue;
            }

            let participant = Participant::new(entry.label.as_str(), entry.model.trim());
            if participants.iter().any(|p| p.answers_to(&participant.label)) {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::DuplicateLabel {
                        label: participant.label.clone(),
                    },
                    message: format!(
                        "{}: label '{}' is already used by another participant",
                        field, participant.label
                    ),
                });
                continue;
            }
            participants.push(participant);
        }

        if self.participants.is_empty() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::EmptyRoster,
                message: "debate.participants: at least one participant is required".to_string(),
            });
        }

        (Roster::new(participants).ok(), issues)
    }

    pub(super) fn max_rounds_issues(&self) -> Vec<ConfigIssue> {
        if self.max_rounds > 0 {
            return Vec::new();
        }
        vec![ConfigIssue {
            severity: Severity::Warning,
            code: ConfigIssueCode::ZeroRounds,
            message: "debate.max_rounds: 0 is not allowed, using 1".to_string(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let (roster, issues) = FileDebateConfig::default().parse_roster();
        assert!(issues.is_empty());
        assert_eq!(
            roster.unwrap().labels(),
            vec!["GPT-5", "GPT-4o", "GPT-41"]
        );
    }

    #[test]
    fn test_participants_deserialize() {
        let toml_str = r#"
[debate]
max_rounds = 5
participants = [
    { label = "Atlas", model = "gpt-5" },
    { label = "Boreas", model = "gpt-4o" },
]
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.debate.max_rounds, 5);
        let (roster, issues) = config.debate.parse_roster();
        assert!(issues.is_empty());
        let roster = roster.unwrap();
        assert_eq!(roster.labels(), vec!["Atlas", "Boreas"]);
        assert_eq!(roster.get("Boreas").unwrap().model.as_str(), "gpt-4o");
    }

    #[test]
    fn test_duplicate_label_is_reported() {
        let config = FileDebateConfig {
            max_rounds: 3,
            participants: vec![
                FileParticipant {
                    label: "Atlas".to_string(),
                    model: "gpt-5".to_string(),
                },
                FileParticipant {
                    label: "Atlas".to_string(),
                    model: "gpt-4o".to_string(),
                },
            ],
        };
        let (roster, issues) = config.parse_roster();
        assert_eq!(roster.unwrap().len(), 1);
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::DuplicateLabel { label } if label == "Atlas"
        )));
    }

    #[test]
    fn test_case_variant_label_is_reported() {
        let config = FileDebateConfig {
            max_rounds: 3,
            participants: vec![
                FileParticipant {
                    label: "Atlas".to_string(),
                    model: "gpt-5".to_string(),
                },
                FileParticipant {
                    label: "atlas".to_string(),
                    model: "gpt-4o".to_string(),
                },
            ],
        };
        let (roster, issues) = config.parse_roster();
        assert_eq!(roster.unwrap().labels(), vec!["Atlas"]);
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::DuplicateLabel { label } if label == "atlas"
        )));
    }

    #[test]
    fn test_empty_participant_list() {
        let config = FileDebateConfig {
            max_rounds: 3,
            participants: Vec::new(),
        };
        let (roster, issues) = config.parse_roster();
        assert!(roster.is_none());
        assert_eq!(issues[0].code, ConfigIssueCode::EmptyRoster);
    }

    #[test]
    fn test_zero_rounds_is_clamped() {
        let config = FileDebateConfig {
            max_rounds: 0,
            ..Default::default()
        };
        assert_eq!(config.effective_max_rounds(), 1);
        assert_eq!(config.max_rounds_issues()[0].severity, Severity::Warning);
    }
}
