//! Run Debate use case
//!
//! Drives a full debate session: round 1 for every participant, further
//! rounds for those still standing, one judge adjudication, one consensus
//! poll over the whole roster and one synthesis request.
//!
//! Every agent call is sequential and in roster order. The digest a debater
//! sees in round N is built once at the start of that round, so the outcome
//! does not depend on who was polled first.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{DebateProgressNotifier, NoDebateProgress};
use debate_domain::{
    ConsensusReply, ConsensusTally, ConsensusVote, ConversationHistory, DebateConfig, DebatePhase,
    DebatePrompts, DebaterReply, DebaterState, DomainError, JudgeResult, Message, NormalizedReply,
    Participant, Question, SessionResult, Transcript, TranscriptEntry, Verdict,
    extract_final_answer, final_positions, round_digest,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Total attempts per debater or consensus request, the first included
const MAX_ATTEMPTS: u32 = 2;

/// Errors that abort a debate session
///
/// Malformed or missing agent replies are never errors; they degrade to
/// defaulted values.
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error("Invalid debate configuration: {0}")]
    InvalidConfig(#[from] DomainError),
}

/// Input for the RunDebate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    /// The user's submission
    pub question: Question,
    /// Operator instructions appended to every system prompt
    pub operator_context: String,
}

impl RunDebateInput {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            operator_context: String::new(),
        }
    }

    pub fn with_operator_context(mut self, context: impl Into<String>) -> Self {
        self.operator_context = context.into();
        self
    }
}

/// Use case for running a debate session
pub struct RunDebateUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    config: DebateConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> RunDebateUseCase<G> {
    pub fn new(gateway: Arc<G>, config: DebateConfig) -> Self {
        Self {
            gateway,
            config,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn config(&self) -> &DebateConfig {
        &self.config
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunDebateInput) -> Result<SessionResult, RunDebateError> {
        self.execute_with_progress(input, &NoDebateProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<SessionResult, RunDebateError> {
        self.config.validate()?;

        let config = &self.config;
        let question = input.question.content();
        let context = input.operator_context.as_str();

        info!(
            "Starting debate with {} participants (max {} rounds)",
            config.roster.len(),
            config.max_rounds
        );
        progress.on_session_start(config.roster.len(), config.max_rounds);

        let mut transcript = Transcript::new();

        // Round 1: every participant answers
        let mut states = self
            .round_one(question, context, &mut transcript, progress)
            .await;

        // Rounds 2..=max_rounds: only those still standing
        let mut rounds = 1;
        while active_count(&states) > 1 && rounds < config.max_rounds {
            rounds += 1;
            self.round_n(rounds, &mut states, &mut transcript, progress)
                .await;
        }

        let provisional_winner = match active_labels(&states).as_slice() {
            [only] => Some(only.to_string()),
            _ => None,
        };
        info!(
            "Debate ended after {} round(s); provisional winner: {}",
            rounds,
            provisional_winner.as_deref().unwrap_or("none")
        );

        let judge = self
            .adjudicate(
                question,
                context,
                provisional_winner.as_deref(),
                &states,
                &transcript,
                progress,
            )
            .await;
        transcript.push(TranscriptEntry::judge(&config.judge.label, &judge));

        let consensus = self.poll_consensus(&judge, &mut states, progress).await;

        let verdict_text = judge.summary(&config.judge.label);
        let final_answer = self
            .synthesize(
                question,
                context,
                &verdict_text,
                &judge,
                provisional_winner.as_deref(),
                &states,
                progress,
            )
            .await;

        let result = SessionResult {
            question: question.to_string(),
            verdict_text,
            votes_text: consensus.summary(),
            final_answer,
            provisional_winner,
            rounds,
            transcript_text: transcript.format_display(),
            raw_transcript: transcript.format_plain(),
            transcript,
            judge,
            consensus,
        };

        self.conversation_logger.log(ConversationEvent::new(
            "session_complete",
            json!({
                "rounds": result.rounds,
                "provisional_winner": result.provisional_winner,
                "verdict": result.judge.verdict.as_str(),
                "agree": result.consensus.agree_count,
                "disagree": result.consensus.disagree_count,
            }),
        ));
        progress.on_phase_start(&DebatePhase::Done);
        progress.on_session_complete();

        Ok(result)
    }

    /// Seed every participant's history and collect its opening reply
    async fn round_one(
        &self,
        question: &str,
        context: &str,
        transcript: &mut Transcript,
        progress: &dyn DebateProgressNotifier,
    ) -> Vec<DebaterState> {
        info!("Round 1");
        progress.on_phase_start(&DebatePhase::Round1);

        let mut states = Vec::with_capacity(self.config.roster.len());
        for participant in &self.config.roster {
            let history = ConversationHistory::seeded(
                DebatePrompts::debater_system(&participant.label, context),
                DebatePrompts::initial_round(question),
            );
            let mut state = DebaterState::new(participant.clone(), history);

            let reply: DebaterReply = self
                .request_reply(
                    participant,
                    state.history_mut(),
                    DebatePrompts::debater_retry(),
                    progress,
                )
                .await;
            self.record_debater_reply(1, &mut state, reply, transcript, progress);

            states.push(state);
        }
        states
    }

    /// One rebuttal round over the participants active at its start
    async fn round_n(
        &self,
        round: u32,
        states: &mut [DebaterState],
        transcript: &mut Transcript,
        progress: &dyn DebateProgressNotifier,
    ) {
        info!("Round {}", round);
        progress.on_phase_start(&DebatePhase::RoundN(round));

        let digest = round_digest(
            states
                .iter()
                .filter_map(|s| s.latest().map(|reply| (s.label(), reply))),
        );
        let polled: Vec<usize> = states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_active())
            .map(|(i, _)| i)
            .collect();
        debug!("Round {} polls {} participant(s)", round, polled.len());

        for index in polled {
            let state = &mut states[index];
            let participant = state.participant().clone();
            state
                .history_mut()
                .push_user(DebatePrompts::round_update(round, &digest));

            let reply: DebaterReply = self
                .request_reply(
                    &participant,
                    state.history_mut(),
                    DebatePrompts::debater_retry(),
                    progress,
                )
                .await;
            self.record_debater_reply(round, state, reply, transcript, progress);
        }
    }

    fn record_debater_reply(
        &self,
        round: u32,
        state: &mut DebaterState,
        reply: DebaterReply,
        transcript: &mut Transcript,
        progress: &dyn DebateProgressNotifier,
    ) {
        debug!(
            "Round {} - {}: {}{}",
            round,
            state.label(),
            reply.stance_label(),
            if reply.valid { "" } else { " (unparsed)" }
        );
        transcript.push(TranscriptEntry::debater(round, state.label(), &reply));
        progress.on_debater_reply(round, state.participant(), &reply);
        self.conversation_logger.log(ConversationEvent::new(
            "debater_reply",
            json!({
                "round": round,
                "participant": state.label(),
                "model": state.participant().model.as_str(),
                "stance": reply.stance.as_str(),
                "conceded_to": reply.conceded_to,
                "valid": reply.valid,
                "content": reply.content,
                "notes": reply.notes,
            }),
        ));
        state.record(reply);
    }

    /// Single judge request over the transcript so far
    async fn adjudicate(
        &self,
        question: &str,
        context: &str,
        provisional_winner: Option<&str>,
        states: &[DebaterState],
        transcript: &Transcript,
        progress: &dyn DebateProgressNotifier,
    ) -> JudgeResult {
        info!("Adjudication");
        progress.on_phase_start(&DebatePhase::Adjudication);

        let judge = &self.config.judge;
        let positions = final_positions(latest_replies(states));
        let history = ConversationHistory::seeded(
            DebatePrompts::judge_system(&judge.label, context),
            DebatePrompts::judge_request(
                question,
                provisional_winner,
                &transcript.format_plain(),
                &positions,
            ),
        );

        let raw = self.complete(judge, history.messages()).await;
        let result = JudgeResult::parse(&raw);

        info!(
            "{} verdict: {} (winner: {})",
            judge.label,
            result.verdict,
            result.winner.as_deref().unwrap_or("none")
        );
        progress.on_judge_verdict(&judge.label, &result);
        self.conversation_logger.log(ConversationEvent::new(
            "judge_verdict",
            json!({
                "judge": judge.label,
                "model": judge.model.as_str(),
                "verdict": result.verdict.as_str(),
                "winner": result.winner,
                "conclusion": result.conclusion,
                "reasoning": result.reasoning,
            }),
        ));

        result
    }

    /// Ask every participant, conceded or not, whether it accepts the verdict
    async fn poll_consensus(
        &self,
        judge: &JudgeResult,
        states: &mut [DebaterState],
        progress: &dyn DebateProgressNotifier,
    ) -> ConsensusTally {
        info!("Consensus poll");
        progress.on_phase_start(&DebatePhase::Consensus);

        let request = DebatePrompts::consensus_request(
            &judge.conclusion,
            judge.reasoning.as_deref().unwrap_or(""),
        );

        let mut votes = Vec::with_capacity(states.len());
        for state in states.iter_mut() {
            let participant = state.participant().clone();
            state.history_mut().push_user(request.clone());

            let reply: ConsensusReply = self
                .request_reply(
                    &participant,
                    state.history_mut(),
                    DebatePrompts::consensus_retry(),
                    progress,
                )
                .await;

            progress.on_consensus_vote(&participant, &reply);
            self.conversation_logger.log(ConversationEvent::new(
                "consensus_reply",
                json!({
                    "participant": participant.label,
                    "agreement": reply.agreement.as_str(),
                    "comment": reply.comment,
                    "valid": reply.valid,
                }),
            ));
            votes.push(ConsensusVote::new(participant.label, reply));
        }

        let tally = ConsensusTally::from_votes(votes);
        info!(
            "Consensus: {} agree, {} disagree",
            tally.agree_count, tally.disagree_count
        );
        tally
    }

    /// Single writer request producing the user-facing answer
    #[allow(clippy::too_many_arguments)]
    async fn synthesize(
        &self,
        question: &str,
        context: &str,
        verdict_text: &str,
        judge: &JudgeResult,
        provisional_winner: Option<&str>,
        states: &[DebaterState],
        progress: &dyn DebateProgressNotifier,
    ) -> String {
        info!("Synthesis");
        progress.on_phase_start(&DebatePhase::Synthesis);

        let winner = self.decisive_winner(judge, provisional_winner, states);
        if let Some((label, _)) = winner {
            debug!("Using {}'s final statement as the decisive source", label);
        }

        let writer = &self.config.writer;
        let history = ConversationHistory::seeded(
            DebatePrompts::writer_system(&writer.label, context),
            DebatePrompts::writer_request(question, verdict_text, &judge.conclusion, winner),
        );

        let raw = self.complete(writer, history.messages()).await;
        let answer = extract_final_answer(&raw, &judge.conclusion);

        self.conversation_logger.log(ConversationEvent::new(
            "final_answer",
            json!({
                "writer": writer.label,
                "model": writer.model.as_str(),
                "answer": answer,
            }),
        ));
        answer
    }

    /// Winner whose final statement the writer should build on.
    ///
    /// The judge's named winner is matched case-insensitively against the
    /// roster. Without one, the provisional winner counts only when the judge
    /// approved it.
    fn decisive_winner<'a>(
        &self,
        judge: &JudgeResult,
        provisional_winner: Option<&str>,
        states: &'a [DebaterState],
    ) -> Option<(&'a str, &'a str)> {
        let label = match judge.winner.as_deref() {
            Some(named) => self.config.roster.find_ignore_case(named)?.label.as_str(),
            None if judge.verdict == Verdict::Approved => provisional_winner?,
            None => return None,
        };

        let state = states.iter().find(|s| s.label() == label)?;
        let statement = state.latest()?.content.trim();
        if statement.is_empty() {
            return None;
        }
        Some((state.label(), statement))
    }

    /// One request/validate/retry cycle.
    ///
    /// The raw reply is always appended to the agent's history. An invalid
    /// reply earns one corrective turn and one more attempt; after that the
    /// best-effort value is returned as is.
    async fn request_reply<R: NormalizedReply>(
        &self,
        agent: &Participant,
        history: &mut ConversationHistory,
        corrective: &str,
        progress: &dyn DebateProgressNotifier,
    ) -> R {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let raw = self.complete(agent, history.messages()).await;
            let reply = R::normalize(&raw);
            history.push_assistant(raw);

            if reply.is_valid() || attempt >= MAX_ATTEMPTS {
                if !reply.is_valid() {
                    warn!(
                        "{} returned an unparseable reply twice; using best-effort values",
                        agent.label
                    );
                }
                return reply;
            }

            debug!("{} reply failed to parse; retrying", agent.label);
            progress.on_retry(&agent.label);
            history.push_user(corrective);
        }
    }

    /// Call the gateway; a failure becomes empty text
    async fn complete(&self, agent: &Participant, messages: &[Message]) -> String {
        match self.gateway.complete(&agent.model, messages).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Completion for {} ({}) failed: {}", agent.label, agent.model, e);
                String::new()
            }
        }
    }
}

fn active_count(states: &[DebaterState]) -> usize {
    states.iter().filter(|s| s.is_active()).count()
}

fn active_labels(states: &[DebaterState]) -> Vec<&str> {
    states
        .iter()
        .filter(|s| s.is_active())
        .map(|s| s.label())
        .collect()
}

fn latest_replies(states: &[DebaterState]) -> impl Iterator<Item = (&str, &DebaterReply)> {
    states
        .iter()
        .filter_map(|s| s.latest().map(|reply| (s.label(), reply)))
}
