//! Orchestration value objects - immutable result types for debate sessions.
//!
//! - [`SessionResult`] - Everything a finished session hands back to the caller

use crate::debate::consensus::ConsensusTally;
use crate::debate::judge::JudgeResult;
use crate::debate::reply::ConsensusReply;
use crate::debate::transcript::Transcript;
use serde::{Deserialize, Serialize};

/// Complete result of a debate session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    /// The user's submission
    pub question: String,
    /// Human-readable verdict block
    pub verdict_text: String,
    /// Human-readable vote block
    pub votes_text: String,
    /// Answer for the user; never empty
    pub final_answer: String,
    /// Lone participant left standing when the debate loop ended
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisional_winner: Option<String>,
    /// Number of debate rounds actually run
    pub rounds: u32,
    /// Markdown transcript for display
    pub transcript_text: String,
    /// Plain transcript, as shown to the judge
    pub raw_transcript: String,
    pub transcript: Transcript,
    pub judge: JudgeResult,
    pub consensus: ConsensusTally,
}

impl SessionResult {
    /// Consensus vote of one participant
    pub fn consensus_for(&self, participant: &str) -> Option<&ConsensusReply> {
        self.consensus.get(participant)
    }

    /// Whether every participant accepted the verdict
    pub fn is_unanimous(&self) -> bool {
        self.consensus.is_unanimous()
    }
}
