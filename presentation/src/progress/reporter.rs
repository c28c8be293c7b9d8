//! Progress reporting for debate sessions

use colored::Colorize;
use debate_application::DebateProgressNotifier;
use debate_domain::{ConsensusReply, DebatePhase, DebaterReply, JudgeResult, Participant};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// One-line status for a debater reply
///
/// `Round 2 - GPT-4o (CONCEDE → GPT-5) | Notes: agreed on scope`
pub fn round_status_line(round: u32, label: &str, reply: &DebaterReply) -> String {
    let stance = match (&reply.conceded_to, reply.is_concession()) {
        (Some(winner), true) => format!("CONCEDE → {}", winner),
        _ => reply.stance.as_str().to_uppercase(),
    };

    let notes = reply
        .notes
        .as_deref()
        .map(|notes| notes.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|notes| !notes.is_empty())
        .map(|notes| format!(" | Notes: {}", notes))
        .unwrap_or_default();

    format!("Round {} - {} ({}){}", round, label, stance, notes)
}

/// Reports debate progress with colored status lines and a spinner while
/// the judge and writer work
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner(&self, message: String) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn stop_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateProgressNotifier for ProgressReporter {
    fn on_session_start(&self, participants: usize, max_rounds: u32) {
        println!(
            "{} {}",
            "Commencing Debate!".green().bold(),
            format!("({} participants, up to {} rounds)", participants, max_rounds).dimmed()
        );
    }

    fn on_phase_start(&self, phase: &DebatePhase) {
        match phase {
            DebatePhase::Adjudication => {
                self.start_spinner("Judge reviewing debate...".magenta().to_string())
            }
            DebatePhase::Consensus => println!("{}", "Polling consensus...".magenta()),
            DebatePhase::Synthesis => {
                self.start_spinner("Writer drafting the final answer...".magenta().to_string())
            }
            DebatePhase::Done => self.stop_spinner(),
            DebatePhase::Round1 | DebatePhase::RoundN(_) => {}
        }
    }

    fn on_debater_reply(&self, round: u32, participant: &Participant, reply: &DebaterReply) {
        println!("{}", round_status_line(round, &participant.label, reply).cyan());
    }

    fn on_retry(&self, agent: &str) {
        println!(
            "{}",
            format!("{} sent invalid JSON, asking again", agent).yellow()
        );
    }

    fn on_judge_verdict(&self, judge_label: &str, result: &JudgeResult) {
        self.stop_spinner();
        println!(
            "{}",
            format!(
                "{} verdict ready ({})",
                judge_label,
                result.verdict.as_str().to_uppercase()
            )
            .magenta()
        );
    }

    fn on_consensus_vote(&self, participant: &Participant, reply: &ConsensusReply) {
        let mark = if reply.agrees() {
            "●".green()
        } else {
            "○".red()
        };
        println!(
            "  {} {} {}",
            mark,
            participant.label,
            reply.agreement.display_name().dimmed()
        );
    }

    fn on_session_complete(&self) {
        self.stop_spinner();
    }
}

/// Simple text-based progress (no colors, no spinner)
pub struct SimpleProgress;

impl DebateProgressNotifier for SimpleProgress {
    fn on_session_start(&self, participants: usize, max_rounds: u32) {
        println!(
            "Commencing Debate! ({} participants, up to {} rounds)",
            participants, max_rounds
        );
    }

    fn on_phase_start(&self, phase: &DebatePhase) {
        if phase.round().is_none() && *phase != DebatePhase::Done {
            println!("-> {}", phase);
        }
    }

    fn on_debater_reply(&self, round: u32, participant: &Participant, reply: &DebaterReply) {
        println!("{}", round_status_line(round, &participant.label, reply));
    }

    fn on_judge_verdict(&self, judge_label: &str, result: &JudgeResult) {
        println!(
            "{} verdict ready ({})",
            judge_label,
            result.verdict.as_str().to_uppercase()
        );
    }
}
