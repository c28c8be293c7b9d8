//! Judge verdict decoding
//!
//! The judge answers once per session. Its reply is decoded leniently like
//! every other agent reply, with one extra rule: a judge sometimes wraps its
//! whole verdict object inside the `conclusion` string. Exactly one such
//! layer is peeled; anything nested deeper is kept as opaque text.

use super::parsing::{coerce_text, parse_reply_object, text_field};
use serde::{Deserialize, Serialize};

/// Stand-in conclusion when the judge produced no usable text at all
pub const NO_CONCLUSION_PLACEHOLDER: &str = "[No conclusion provided]";

/// Outcome of the adjudication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The provisional winner's answer was confirmed
    Approved,
    /// The provisional winner was wrong; the judge corrected it
    Rejected,
    /// No single winner; the judge produced the answer itself
    #[default]
    NoWinner,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Rejected => "rejected",
            Verdict::NoWinner => "no_winner",
        }
    }

    /// Decode a verdict string; unknown values collapse to [`Verdict::NoWinner`]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "approved" => Verdict::Approved,
            "rejected" => Verdict::Rejected,
            _ => Verdict::NoWinner,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decoded judge reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeResult {
    pub verdict: Verdict,
    /// The judge's answer for the user; never empty
    pub conclusion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Winner as asserted by the judge, unvalidated against the roster
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    pub raw: String,
}

impl JudgeResult {
    /// Decode a raw judge completion.
    ///
    /// The conclusion is taken from the `conclusion` field, else the whole
    /// reply. When that text is itself a JSON object, its `conclusion`,
    /// `reasoning`, `verdict` and `winner` fields take precedence over the
    /// outer ones. An empty result becomes [`NO_CONCLUSION_PLACEHOLDER`].
    pub fn parse(raw: &str) -> Self {
        let outer = parse_reply_object(raw);

        let mut verdict = text_field(&outer, "verdict")
            .map(Verdict::parse)
            .unwrap_or_default();
        let mut reasoning = coerce_text(&outer, "reasoning");
        let mut winner = text_field(&outer, "winner").map(str::to_string);

        let mut conclusion = coerce_text(&outer, "conclusion")
            .unwrap_or_else(|| raw.to_string())
            .trim()
            .to_string();
        if conclusion.is_empty() {
            conclusion = raw.trim().to_string();
        }

        if conclusion.starts_with('{') {
            let nested = parse_reply_object(&conclusion);
            if !nested.is_empty() {
                if let Some(inner) = text_field(&nested, "conclusion")
                    && !inner.trim().is_empty()
                {
                    conclusion = inner.trim().to_string();
                }
                if nested.contains_key("reasoning") {
                    reasoning = coerce_text(&nested, "reasoning");
                }
                if nested.contains_key("verdict") {
                    verdict = text_field(&nested, "verdict")
                        .map(Verdict::parse)
                        .unwrap_or_default();
                }
                if nested.contains_key("winner") {
                    winner = text_field(&nested, "winner").map(str::to_string);
                }
            }
        }

        if conclusion.is_empty() {
            conclusion = NO_CONCLUSION_PLACEHOLDER.to_string();
        }

        Self {
            verdict,
            conclusion,
            reasoning: non_empty(reasoning),
            winner: non_empty(winner),
            raw: raw.to_string(),
        }
    }

    /// Human-readable verdict block shown to the user and the writer
    pub fn summary(&self, judge_label: &str) -> String {
        let mut lines = vec![
            format!("{} Verdict ({}):", judge_label, self.verdict),
            format!(
                "Validated winner: {}",
                self.winner.as_deref().unwrap_or("None")
            ),
            format!("Judge final conclusion: {}", self.conclusion),
        ];
        if let Some(reasoning) = &self.reasoning {
            lines.push(format!("Reasoning: {}", reasoning));
        }
        lines.join("\n").trim().to_string()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_judge_reply() {
        let result = JudgeResult::parse("not json at all");
        assert_eq!(result.verdict, Verdict::NoWinner);
        assert_eq!(result.conclusion, "not json at all");
        assert!(result.winner.is_none());
        assert!(result.reasoning.is_none());
    }

    #[test]
    fn test_structured_judge_reply() {
        let result = JudgeResult::parse(
            r#"{"verdict": "approved", "winner": "Atlas", "conclusion": " Paris ", "reasoning": "well sourced"}"#,
        );
        assert_eq!(result.verdict, Verdict::Approved);
        assert_eq!(result.winner.as_deref(), Some("Atlas"));
        assert_eq!(result.conclusion, "Paris");
        assert_eq!(result.reasoning.as_deref(), Some("well sourced"));
    }

    #[test]
    fn test_nested_conclusion_is_unwrapped_once() {
        let raw = r#"{"verdict":"approved","winner":"Atlas","conclusion":"{\"conclusion\":\"X\",\"reasoning\":\"Y\"}"}"#;
        let result = JudgeResult::parse(raw);
        assert_eq!(result.conclusion, "X");
        assert_eq!(result.reasoning.as_deref(), Some("Y"));
        assert_eq!(result.verdict, Verdict::Approved);
        assert_eq!(result.winner.as_deref(), Some("Atlas"));
    }

    #[test]
    fn test_nested_fields_override_outer() {
        let raw = r#"{"verdict":"approved","winner":"Atlas","conclusion":"{\"conclusion\":\"X\",\"verdict\":\"rejected\",\"winner\":null}"}"#;
        let result = JudgeResult::parse(raw);
        assert_eq!(result.verdict, Verdict::Rejected);
        assert!(result.winner.is_none());
    }

    #[test]
    fn test_deeper_nesting_stays_opaque() {
        let inner = r#"{\"conclusion\":\"{\\\"conclusion\\\":\\\"deep\\\"}\"}"#;
        let raw = format!(r#"{{"conclusion":"{}"}}"#, inner);
        let result = JudgeResult::parse(&raw);
        assert_eq!(result.conclusion, r#"{"conclusion":"deep"}"#);
    }

    #[test]
    fn test_empty_conclusion_falls_back_to_raw() {
        let raw = r#"{"verdict": "no_winner", "conclusion": "   "}"#;
        let result = JudgeResult::parse(raw);
        assert_eq!(result.conclusion, raw);
    }

    #[test]
    fn test_empty_reply_uses_placeholder() {
        let result = JudgeResult::parse("   ");
        assert_eq!(result.conclusion, NO_CONCLUSION_PLACEHOLDER);
        assert_eq!(result.verdict, Verdict::NoWinner);
    }

    #[test]
    fn test_unknown_verdict_is_no_winner() {
        assert_eq!(Verdict::parse("APPROVED"), Verdict::Approved);
        assert_eq!(Verdict::parse("no winner"), Verdict::NoWinner);
        assert_eq!(Verdict::parse("maybe"), Verdict::NoWinner);
    }

    #[test]
    fn test_summary() {
        let result = JudgeResult::parse(
            r#"{"verdict": "approved", "winner": "Atlas", "conclusion": "Paris", "reasoning": "ok"}"#,
        );
        assert_eq!(
            result.summary("The Judge"),
            "The Judge Verdict (approved):\nValidated winner: Atlas\nJudge final conclusion: Paris\nReasoning: ok"
        );

        let result = JudgeResult::parse("plain");
        assert_eq!(
            result.summary("The Judge"),
            "The Judge Verdict (no_winner):\nValidated winner: None\nJudge final conclusion: plain"
        );
    }
}
