//! Progress notification port
//!
//! Defines the interface for reporting progress during a debate session.

use debate_domain::{ConsensusReply, DebatePhase, DebaterReply, JudgeResult, Participant};

/// Callback for progress updates during a debate session
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, log file, etc.)
pub trait DebateProgressNotifier: Send + Sync {
    /// Called once, before round 1
    fn on_session_start(&self, participants: usize, max_rounds: u32);

    /// Called when a phase starts
    fn on_phase_start(&self, phase: &DebatePhase);

    /// Called after each recorded debater reply
    fn on_debater_reply(&self, round: u32, participant: &Participant, reply: &DebaterReply);

    /// Called when an agent reply failed to parse and a corrective turn is sent
    fn on_retry(&self, _agent: &str) {}

    /// Called once the judge's verdict is decoded
    fn on_judge_verdict(&self, judge_label: &str, result: &JudgeResult);

    /// Called after each consensus vote
    fn on_consensus_vote(&self, _participant: &Participant, _reply: &ConsensusReply) {}

    /// Called when the session result is assembled
    fn on_session_complete(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoDebateProgress;

impl DebateProgressNotifier for NoDebateProgress {
    fn on_session_start(&self, _participants: usize, _max_rounds: u32) {}
    fn on_phase_start(&self, _phase: &DebatePhase) {}
    fn on_debater_reply(&self, _round: u32, _participant: &Participant, _reply: &DebaterReply) {}
    fn on_judge_verdict(&self, _judge_label: &str, _result: &JudgeResult) {}
}
