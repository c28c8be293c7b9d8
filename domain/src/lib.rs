//! Domain layer for quorum-debate
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! Several independent models answer the same submission, then argue over
//! a fixed number of rounds. A model that finds another's case stronger
//! concedes and leaves the debate.
//!
//! ## Adjudication and Consensus
//!
//! - **Judge**: reviews the transcript once and delivers a verdict
//! - **Consensus poll**: every participant votes on the verdict
//! - **Writer**: turns the verdict into the final user-facing answer

pub mod config;
pub mod core;
pub mod debate;
pub mod orchestration;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, model::Model, question::Question};
pub use debate::{
    Agreement, ConsensusReply, ConsensusTally, ConsensusVote, DebaterReply, JudgeResult,
    NormalizedReply, Participant, Roster, RoundLabel, Stance, Transcript, TranscriptEntry,
    Verdict, extract_final_answer, final_positions, parse_reply_object, round_digest,
};
pub use orchestration::{
    entities::{DebateConfig, DebatePhase, DebaterState},
    value_objects::SessionResult,
};
pub use prompt::DebatePrompts;
pub use session::entities::{ConversationHistory, Message, Role};
