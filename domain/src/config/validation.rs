//! Sanity checks for a [`DebateConfig`] that is structurally valid but
//! likely to behave unexpectedly.
//!
//! Hard errors (empty roster, blank labels, zero rounds) are rejected by
//! construction or by [`DebateConfig::validate`]; this module reports the
//! softer issues with a severity level.
//!
//! # Examples
//!
//! ```
//! use debate_domain::DebateConfig;
//!
//! let issues = DebateConfig::default().check();
//! assert!(issues.is_empty());
//! ```

use crate::orchestration::entities::DebateConfig;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A model selector is empty or blank.
    EmptyModelName { field: String },
    /// A participant, judge or writer label is empty or blank.
    EmptyLabel { field: String },
    /// Two participants share a label.
    DuplicateLabel { label: String },
    /// No participants are listed.
    EmptyRoster,
    /// `max_rounds = 0`; it is raised to 1.
    ZeroRounds,
    /// `timeout_seconds = 0`.
    InvalidTimeout,
    /// One debater has nobody to argue with; the debate ends after round 1.
    SingleParticipant,
    /// The judge shares a label with a debater and may look partial.
    JudgeIsParticipant,
    /// The round cap is 1, so nobody ever gets a chance to concede.
    NoRebuttalRounds,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl DebateConfig {
    /// Report soft configuration issues.
    pub fn check(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.roster.len() == 1 {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::SingleParticipant,
                message: "Only one participant is configured; the debate will end after round 1."
                    .to_string(),
            });
        }

        if self.roster.find_ignore_case(&self.judge.label).is_some() {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::JudgeIsParticipant,
                message: format!(
                    "Judge label '{}' is also a participant label.",
                    self.judge.label
                ),
            });
        }

        if self.max_rounds == 1 && self.roster.len() > 1 {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::NoRebuttalRounds,
                message: "max_rounds = 1 leaves no rounds for rebuttals or concessions."
                    .to_string(),
            });
        }

        issues
    }
}
