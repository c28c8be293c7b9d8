//! Normalized agent replies.
//!
//! Raw completions are decoded once, here, into fully typed records. The
//! wire convention `"concede:<Label>"` is split into [`Stance::Concede`] and
//! a separate `conceded_to` field; nothing downstream looks at the raw stance
//! string again.
//!
//! Both decoders follow the same discipline: parse leniently, default every
//! missing or malformed field, and report through `valid` whether the reply
//! carried the keys the prompt asked for. `valid` only drives the one-shot
//! retry; an invalid reply is still a usable reply.

use super::parsing::{coerce_text, parse_reply_object, text_field};
use serde::{Deserialize, Serialize};

/// A debater's position for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    /// Still contesting
    #[default]
    Stand,
    /// Yielding; irrevocable for the rest of the session
    Concede,
}

impl Stance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stance::Stand => "stand",
            Stance::Concede => "concede",
        }
    }

    pub fn is_concede(&self) -> bool {
        matches!(self, Stance::Concede)
    }
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical form of one debater reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebaterReply {
    pub stance: Stance,
    /// The argument itself
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Participant the debater yielded to; only set when conceding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conceded_to: Option<String>,
    /// Whether the reply parsed as an object with both `stance` and `content`
    pub valid: bool,
    /// Original completion text, kept for audit
    pub raw: String,
}

impl DebaterReply {
    /// Decode a raw debater completion
    pub fn parse(raw: &str) -> Self {
        let object = parse_reply_object(raw);
        let valid = object.contains_key("stance") && object.contains_key("content");

        let (stance, conceded_to) = decode_stance(text_field(&object, "stance").unwrap_or(""));

        let content = coerce_text(&object, "content")
            .unwrap_or_else(|| raw.to_string())
            .trim()
            .to_string();

        Self {
            stance,
            content,
            notes: non_empty(text_field(&object, "notes")),
            conceded_to,
            valid,
            raw: raw.to_string(),
        }
    }

    pub fn is_concession(&self) -> bool {
        self.stance.is_concede()
    }

    /// Stance as shown to humans and the judge: `stand`, `concede` or
    /// `concede to <Label>`
    pub fn stance_label(&self) -> String {
        match (&self.stance, &self.conceded_to) {
            (Stance::Concede, Some(target)) => format!("concede to {}", target),
            (stance, _) => stance.to_string(),
        }
    }
}

/// Split a wire stance such as `"Concede: Atlas"` into stance and target.
///
/// Anything that is not `stand` or `concede[:<label>]` counts as `stand`, so
/// an unexpected value keeps the debater in the debate.
fn decode_stance(value: &str) -> (Stance, Option<String>) {
    let value = value.trim();
    if !value.to_lowercase().starts_with("concede") {
        return (Stance::Stand, None);
    }

    let target = value
        .split_once(':')
        .map(|(_, suffix)| suffix.trim())
        .filter(|suffix| !suffix.is_empty())
        .map(str::to_string);

    (Stance::Concede, target)
}

/// A participant's reaction to the judge's verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Agreement {
    #[default]
    Agree,
    Disagree,
}

impl Agreement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Agreement::Agree => "agree",
            Agreement::Disagree => "disagree",
        }
    }

    /// Capitalized form used in vote listings
    pub fn display_name(&self) -> &'static str {
        match self {
            Agreement::Agree => "Agree",
            Agreement::Disagree => "Disagree",
        }
    }
}

impl std::fmt::Display for Agreement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical form of one consensus-poll reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusReply {
    pub agreement: Agreement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Whether the reply parsed as an object with an `agreement` key
    pub valid: bool,
    pub raw: String,
}

impl ConsensusReply {
    /// Decode a raw consensus completion.
    ///
    /// Ambiguous input counts as agreement: only an explicit `disagree`
    /// registers dissent.
    pub fn parse(raw: &str) -> Self {
        let object = parse_reply_object(raw);
        let valid = object.contains_key("agreement");

        let agreement = match text_field(&object, "agreement")
            .map(|a| a.trim().to_lowercase())
            .as_deref()
        {
            Some("disagree") => Agreement::Disagree,
            _ => Agreement::Agree,
        };

        Self {
            agreement,
            comment: non_empty(coerce_text(&object, "comment").as_deref()),
            valid,
            raw: raw.to_string(),
        }
    }

    pub fn agrees(&self) -> bool {
        self.agreement == Agreement::Agree
    }
}

/// Common shape of the two reply kinds, used by the retry loop
pub trait NormalizedReply: Sized {
    fn normalize(raw: &str) -> Self;
    fn is_valid(&self) -> bool;
}

impl NormalizedReply for DebaterReply {
    fn normalize(raw: &str) -> Self {
        DebaterReply::parse(raw)
    }

    fn is_valid(&self) -> bool {
        self.valid
    }
}

impl NormalizedReply for ConsensusReply {
    fn normalize(raw: &str) -> Self {
        ConsensusReply::parse(raw)
    }

    fn is_valid(&self) -> bool {
        self.valid
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== DebaterReply Tests ====================

    #[test]
    fn test_valid_reply_keeps_trimmed_fields() {
        let reply = DebaterReply::parse(
            r#"{"stance": "stand", "content": "  Paris is the capital.  ", "notes": " sourced "}"#,
        );
        assert!(reply.valid);
        assert_eq!(reply.stance, Stance::Stand);
        assert_eq!(reply.content, "Paris is the capital.");
        assert_eq!(reply.notes.as_deref(), Some("sourced"));
        assert!(reply.conceded_to.is_none());
    }

    #[test]
    fn test_unparseable_reply_uses_raw_text_as_content() {
        let raw = "  I think the answer is 42.\n";
        let reply = DebaterReply::parse(raw);
        assert!(!reply.valid);
        assert_eq!(reply.stance, Stance::Stand);
        assert_eq!(reply.content, "I think the answer is 42.");
        assert_eq!(reply.raw, raw);
    }

    #[test]
    fn test_concede_with_target_keeps_label_case() {
        for stance in ["concede:Atlas", "CONCEDE:Atlas", "Concede: Atlas "] {
            let raw = format!(r#"{{"stance": "{}", "content": "fair point"}}"#, stance);
            let reply = DebaterReply::parse(&raw);
            assert_eq!(reply.stance, Stance::Concede, "stance {}", stance);
            assert_eq!(reply.conceded_to.as_deref(), Some("Atlas"));
        }
    }

    #[test]
    fn test_bare_concede_has_no_target() {
        let reply = DebaterReply::parse(r#"{"stance": "concede", "content": "ok"}"#);
        assert_eq!(reply.stance, Stance::Concede);
        assert!(reply.conceded_to.is_none());

        let reply = DebaterReply::parse(r#"{"stance": "concede:  ", "content": "ok"}"#);
        assert_eq!(reply.stance, Stance::Concede);
        assert!(reply.conceded_to.is_none());
    }

    #[test]
    fn test_unknown_stance_becomes_stand() {
        for stance in ["yield", "STAND", "", "maybe later"] {
            let raw = format!(r#"{{"stance": "{}", "content": "x"}}"#, stance);
            assert_eq!(DebaterReply::parse(&raw).stance, Stance::Stand);
        }
        let reply = DebaterReply::parse(r#"{"stance": 7, "content": "x"}"#);
        assert_eq!(reply.stance, Stance::Stand);
        assert!(reply.valid);
    }

    #[test]
    fn test_key_presence_governs_validity() {
        let reply = DebaterReply::parse(r#"{"stance": "", "content": ""}"#);
        assert!(reply.valid);
        assert_eq!(reply.content, "");

        let reply = DebaterReply::parse(r#"{"content": "no stance"}"#);
        assert!(!reply.valid);
        assert_eq!(reply.content, "no stance");
    }

    #[test]
    fn test_object_without_content_falls_back_to_raw() {
        let raw = r#"{"stance": "stand"}"#;
        let reply = DebaterReply::parse(raw);
        assert!(!reply.valid);
        assert_eq!(reply.content, raw);
    }

    #[test]
    fn test_non_string_content_is_coerced() {
        let reply = DebaterReply::parse(r#"{"stance": "stand", "content": 42}"#);
        assert_eq!(reply.content, "42");
    }

    #[test]
    fn test_non_textual_notes_are_dropped() {
        let reply = DebaterReply::parse(r#"{"stance": "stand", "content": "x", "notes": [1]}"#);
        assert!(reply.notes.is_none());
    }

    #[test]
    fn test_stance_label() {
        let reply = DebaterReply::parse(r#"{"stance": "concede:Atlas", "content": "x"}"#);
        assert_eq!(reply.stance_label(), "concede to Atlas");
        let reply = DebaterReply::parse(r#"{"stance": "stand", "content": "x"}"#);
        assert_eq!(reply.stance_label(), "stand");
    }

    // ==================== ConsensusReply Tests ====================

    #[test]
    fn test_consensus_disagree() {
        let reply = ConsensusReply::parse(r#"{"agreement": "Disagree", "comment": " too vague "}"#);
        assert!(reply.valid);
        assert_eq!(reply.agreement, Agreement::Disagree);
        assert_eq!(reply.comment.as_deref(), Some("too vague"));
    }

    #[test]
    fn test_consensus_missing_key_defaults_to_agree() {
        let reply = ConsensusReply::parse(r#"{"comment": "fine"}"#);
        assert!(!reply.valid);
        assert!(reply.agrees());

        let reply = ConsensusReply::parse("sure, sounds right");
        assert!(!reply.valid);
        assert!(reply.agrees());
        assert!(reply.comment.is_none());
    }

    #[test]
    fn test_consensus_unknown_value_is_agree_but_valid() {
        let reply = ConsensusReply::parse(r#"{"agreement": "partially"}"#);
        assert!(reply.valid);
        assert_eq!(reply.agreement, Agreement::Agree);
    }
}
