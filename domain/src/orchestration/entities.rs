//! Orchestration domain entities

use crate::core::error::DomainError;
use crate::debate::participant::{Participant, Roster};
use crate::debate::reply::DebaterReply;
use crate::session::entities::ConversationHistory;
use serde::{Deserialize, Serialize};

/// Phase of a debate session
///
/// ```text
/// Round1 ──▶ RoundN ──▶ Adjudication ──▶ Consensus ──▶ Synthesis ──▶ Done
///   │          ▲  │          ▲
///   │          └──┘          │
///   └────────────────────────┘  (≤ 1 active participant or cap reached)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebatePhase {
    /// Every participant answers the submission
    Round1,
    /// Active participants respond to the latest digest
    RoundN(u32),
    /// The judge reviews the transcript
    Adjudication,
    /// Every participant votes on the verdict
    Consensus,
    /// The writer produces the user-facing answer
    Synthesis,
    Done,
}

impl DebatePhase {
    pub fn as_str(&self) -> &str {
        match self {
            DebatePhase::Round1 | DebatePhase::RoundN(_) => "round",
            DebatePhase::Adjudication => "adjudication",
            DebatePhase::Consensus => "consensus",
            DebatePhase::Synthesis => "synthesis",
            DebatePhase::Done => "done",
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            DebatePhase::Round1 => "Round 1".to_string(),
            DebatePhase::RoundN(n) => format!("Round {}", n),
            DebatePhase::Adjudication => "Adjudication".to_string(),
            DebatePhase::Consensus => "Consensus".to_string(),
            DebatePhase::Synthesis => "Synthesis".to_string(),
            DebatePhase::Done => "Done".to_string(),
        }
    }

    /// Round number for debate phases
    pub fn round(&self) -> Option<u32> {
        match self {
            DebatePhase::Round1 => Some(1),
            DebatePhase::RoundN(n) => Some(*n),
            _ => None,
        }
    }
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Immutable configuration of a debate (Entity)
///
/// Built once at startup and passed into the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateConfig {
    /// Debaters, polled in this order every round
    pub roster: Roster,
    pub judge: Participant,
    /// Agent that writes the final user-facing answer
    pub writer: Participant,
    /// Maximum number of debate rounds, round 1 included
    pub max_rounds: u32,
}

impl DebateConfig {
    pub const DEFAULT_MAX_ROUNDS: u32 = 3;

    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            ..Default::default()
        }
    }

    pub fn with_judge(mut self, judge: Participant) -> Self {
        self.judge = judge;
        self
    }

    pub fn with_writer(mut self, writer: Participant) -> Self {
        self.writer = writer;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_rounds == 0 {
            return Err(DomainError::InvalidMaxRounds(self.max_rounds));
        }
        for agent in [&self.judge, &self.writer] {
            if agent.label.is_empty() {
                return Err(DomainError::EmptyLabel);
            }
            if agent.model.is_empty() {
                return Err(DomainError::EmptyModel(agent.label.clone()));
            }
        }
        Ok(())
    }
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            roster: Roster::default(),
            judge: Participant::new("The Judge", "o3"),
            writer: Participant::new("The Writer", "o3"),
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
        }
    }
}

/// Per-participant debate state (Entity)
///
/// Owns the participant's private conversation history. Once a participant
/// concedes it stays inactive for the rest of the session.
#[derive(Debug, Clone)]
pub struct DebaterState {
    participant: Participant,
    history: ConversationHistory,
    latest: Option<DebaterReply>,
    active: bool,
}

impl DebaterState {
    pub fn new(participant: Participant, history: ConversationHistory) -> Self {
        Self {
            participant,
            history,
            latest: None,
            active: true,
        }
    }

    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    pub fn label(&self) -> &str {
        &self.participant.label
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut ConversationHistory {
        &mut self.history
    }

    pub fn latest(&self) -> Option<&DebaterReply> {
        self.latest.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Store a new reply; a concession deactivates the participant
    pub fn record(&mut self, reply: DebaterReply) {
        if reply.is_concession() {
            self.active = false;
        }
        self.latest = Some(reply);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DebateConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.roster.len(), 3);
        assert_eq!(config.judge.label, "The Judge");
        assert_eq!(config.max_rounds, 3);
    }

    #[test]
    fn test_zero_rounds_is_invalid() {
        let config = DebateConfig::default().with_max_rounds(0);
        assert_eq!(config.validate(), Err(DomainError::InvalidMaxRounds(0)));
    }

    #[test]
    fn test_blank_writer_model_is_invalid() {
        let config = DebateConfig::default().with_writer(Participant::new("Scribe", " "));
        assert_eq!(
            config.validate(),
            Err(DomainError::EmptyModel("Scribe".to_string()))
        );
    }

    #[test]
    fn test_concession_is_irrevocable() {
        let mut state = DebaterState::new(
            Participant::new("Atlas", "gpt-5"),
            ConversationHistory::new(),
        );
        assert!(state.is_active());

        state.record(DebaterReply::parse(r#"{"stance": "concede:Boreas", "content": "ok"}"#));
        assert!(!state.is_active());

        state.record(DebaterReply::parse(r#"{"stance": "stand", "content": "again"}"#));
        assert!(!state.is_active());
        assert_eq!(state.latest().unwrap().content, "again");
    }

    #[test]
    fn test_phase_round() {
        assert_eq!(DebatePhase::Round1.round(), Some(1));
        assert_eq!(DebatePhase::RoundN(3).to_string(), "Round 3");
        assert_eq!(DebatePhase::Consensus.round(), None);
    }
}
