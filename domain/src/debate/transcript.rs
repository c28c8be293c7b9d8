//! Append-only debate transcript and its two renderings

use super::judge::JudgeResult;
use super::reply::DebaterReply;
use serde::{Deserialize, Serialize};

/// Round identifier: a debate round number or a terminal label such as the
/// judge's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoundLabel {
    Number(u32),
    Named(String),
}

impl RoundLabel {
    /// Upper-cased heading used by the display rendering
    fn heading(&self) -> String {
        match self {
            RoundLabel::Number(n) => format!("ROUND {}", n),
            RoundLabel::Named(name) => format!("ROUND {}", name.to_uppercase()),
        }
    }
}

impl std::fmt::Display for RoundLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundLabel::Number(n) => write!(f, "{}", n),
            RoundLabel::Named(name) => write!(f, "{}", name),
        }
    }
}

/// One immutable transcript record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub round: RoundLabel,
    /// Participant label (or the judge label for the verdict entry)
    pub participant: String,
    /// `stand`/`concede` for debaters, the verdict for the judge
    pub stance: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conceded_to: Option<String>,
}

impl TranscriptEntry {
    /// Record a debater reply for a numbered round
    pub fn debater(round: u32, participant: impl Into<String>, reply: &DebaterReply) -> Self {
        Self {
            round: RoundLabel::Number(round),
            participant: participant.into(),
            stance: reply.stance.as_str().to_string(),
            content: reply.content.clone(),
            notes: reply.notes.clone(),
            conceded_to: reply.conceded_to.clone(),
        }
    }

    /// Record the judge's verdict; the winner goes in `conceded_to`
    pub fn judge(judge_label: &str, result: &JudgeResult) -> Self {
        Self {
            round: RoundLabel::Named(judge_label.to_string()),
            participant: judge_label.to_string(),
            stance: result.verdict.as_str().to_string(),
            content: result.conclusion.clone(),
            notes: result.reasoning.clone(),
            conceded_to: result.winner.clone(),
        }
    }
}

/// Ordered log of every recorded reply.
///
/// Entries can only be appended; order is emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Machine-oriented rendering, fed to the judge.
    ///
    /// ```text
    /// Round 2 — Boreas (concede) → conceded to Atlas
    /// Atlas is right.
    /// Notes: checked the source
    /// ```
    pub fn format_plain(&self) -> String {
        let mut lines = Vec::new();
        for entry in &self.entries {
            let mut header = format!(
                "Round {} — {} ({})",
                entry.round, entry.participant, entry.stance
            );
            if let Some(target) = entry.conceded_to.as_deref().filter(|t| !t.is_empty()) {
                header.push_str(&format!(" → conceded to {}", target));
            }
            lines.push(header);
            lines.push(entry.content.trim().to_string());
            if let Some(notes) = entry.notes.as_deref().filter(|n| !n.is_empty()) {
                lines.push(format!("Notes: {}", notes.trim()));
            }
            lines.push(String::new());
        }
        lines.join("\n").trim().to_string()
    }

    /// Markdown rendering shown to the user
    pub fn format_display(&self) -> String {
        let sections: Vec<String> = self
            .entries
            .iter()
            .map(|entry| {
                let stance = entry.stance.to_uppercase();
                let mut section = if stance.is_empty() {
                    format!("### {} - {}", entry.round.heading(), entry.participant)
                } else {
                    format!(
                        "### {} - {} ({})",
                        entry.round.heading(),
                        entry.participant,
                        stance
                    )
                };

                let content = entry.content.trim();
                if !content.is_empty() {
                    section.push('\n');
                    section.push_str(content);
                }
                if let Some(notes) = trimmed(&entry.notes) {
                    section.push_str(&format!("\n**Notes:** {}", notes));
                }
                if let Some(target) = trimmed(&entry.conceded_to) {
                    section.push_str(&format!("\n**Conceded to:** {}", target));
                }
                section
            })
            .collect();

        sections.join("\n\n").trim().to_string()
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TranscriptEntry;
    type IntoIter = std::slice::Iter<'a, TranscriptEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transcript {
        let mut transcript = Transcript::new();
        transcript.push(TranscriptEntry::debater(
            1,
            "Atlas",
            &DebaterReply::parse(r#"{"stance": "stand", "content": "Paris", "notes": "obvious"}"#),
        ));
        transcript.push(TranscriptEntry::debater(
            2,
            "Boreas",
            &DebaterReply::parse(r#"{"stance": "concede:Atlas", "content": "Agreed."}"#),
        ));
        transcript.push(TranscriptEntry::judge(
            "The Judge",
            &JudgeResult::parse(
                r#"{"verdict": "approved", "winner": "Atlas", "conclusion": "Paris", "reasoning": "fine"}"#,
            ),
        ));
        transcript
    }

    #[test]
    fn test_format_plain() {
        let expected = "Round 1 — Atlas (stand)\nParis\nNotes: obvious\n\n\
                        Round 2 — Boreas (concede) → conceded to Atlas\nAgreed.\n\n\
                        Round The Judge — The Judge (approved) → conceded to Atlas\nParis\nNotes: fine";
        assert_eq!(sample().format_plain(), expected);
    }

    #[test]
    fn test_format_display() {
        let expected = "### ROUND 1 - Atlas (STAND)\nParis\n**Notes:** obvious\n\n\
                        ### ROUND 2 - Boreas (CONCEDE)\nAgreed.\n**Conceded to:** Atlas\n\n\
                        ### ROUND THE JUDGE - The Judge (APPROVED)\nParis\n**Notes:** fine\n**Conceded to:** Atlas";
        assert_eq!(sample().format_display(), expected);
    }

    #[test]
    fn test_display_skips_empty_content() {
        let mut transcript = Transcript::new();
        transcript.push(TranscriptEntry::debater(
            1,
            "Atlas",
            &DebaterReply::parse(r#"{"stance": "stand", "content": ""}"#),
        ));
        assert_eq!(transcript.format_display(), "### ROUND 1 - Atlas (STAND)");
    }

    #[test]
    fn test_empty_transcript_renders_empty() {
        let transcript = Transcript::new();
        assert_eq!(transcript.format_plain(), "");
        assert_eq!(transcript.format_display(), "");
    }

    #[test]
    fn test_round_label_serializes_untagged() {
        let json = serde_json::to_string(&sample().entries()[0].round).unwrap();
        assert_eq!(json, "1");
        let json = serde_json::to_string(&sample().entries()[2].round).unwrap();
        assert_eq!(json, "\"The Judge\"");
    }
}
