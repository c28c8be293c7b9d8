//! Debate domain
//!
//! Pure building blocks of a debate session: who takes part, how agent
//! replies are decoded, and how the session is recorded.
//!
//! # Session Flow
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌──────────────┐   ┌───────────┐   ┌───────────┐
//! │ Round 1  │──▶│ Round N  │──▶│ Adjudication │──▶│ Consensus │──▶│ Synthesis │
//! │ (all)    │   │ (active) │   │ (judge)      │   │ (all)     │   │ (writer)  │
//! └──────────┘   └────┬─────┘   └──────────────┘   └───────────┘   └───────────┘
//!                     │  ▲
//!                     └──┘ while >1 active and round <= cap
//! ```
//!
//! Every agent reply goes through [`parse_reply_object`] and one of the typed
//! decoders ([`DebaterReply`], [`ConsensusReply`], [`JudgeResult`],
//! [`extract_final_answer`]). Decoding never fails; missing fields take
//! documented defaults.

pub mod answer;
pub mod consensus;
pub mod digest;
pub mod judge;
pub mod parsing;
pub mod participant;
pub mod reply;
pub mod transcript;

pub use answer::extract_final_answer;
pub use consensus::{ConsensusTally, ConsensusVote};
pub use digest::{final_positions, round_digest};
pub use judge::{JudgeResult, NO_CONCLUSION_PLACEHOLDER, Verdict};
pub use parsing::{ReplyObject, parse_reply_object, strip_code_fences};
pub use participant::{Participant, Roster};
pub use reply::{Agreement, ConsensusReply, DebaterReply, NormalizedReply, Stance};
pub use transcript::{RoundLabel, Transcript, TranscriptEntry};
