//! Prompt templates for the debate flow

/// Templates for generating prompts at each stage of a debate session
pub struct DebatePrompts;

impl DebatePrompts {
    /// System prompt for a debater
    pub fn debater_system(label: &str, operator_context: &str) -> String {
        let prompt = format!(
            r#"You are {label}, an assistant taking part in a structured debate with other models.
Argue for the strongest answer you can, but concede when another participant clearly has the better case.
Every reply must be valid JSON so it can be parsed automatically."#
        );
        with_operator_context(prompt, operator_context)
    }

    /// First user turn for every debater
    pub fn initial_round(submission: &str) -> String {
        format!(
            r#"Round 1 instructions:
- Read the user submission below and give your best initial answer.
- Reply with JSON using the keys "stance", "content", and optional "notes".
- In round 1 "stance" must be "stand"; concessions come later.
- Keep "content" focused on the submission and under 250 words.

User submission:
{}"#,
            submission.trim()
        )
    }

    /// User turn that opens rounds 2 and later
    pub fn round_update(round: u32, digest: &str) -> String {
        format!(
            r#"Round {round} update:
Latest positions as a JSON digest:
{digest}

- Read the digest to see every participant's stance, arguments, and concessions.
- Keep your stance or concede if another participant's case is stronger.
- To concede, set "stance" to "concede:<Participant Name>" naming the participant who should win.
- To stay in, keep "stance" as "stand" and sharpen your argument (under 200 words).
- Reply with JSON using the keys "stance", "content", and optional "notes"."#
        )
    }

    /// Corrective turn after a debater reply that failed to parse
    pub fn debater_retry() -> &'static str {
        r#"The previous reply was not valid JSON. Respond again using only JSON with keys "stance", "content", and optional "notes"."#
    }

    /// User turn asking a participant whether it accepts the verdict
    pub fn consensus_request(conclusion: &str, reasoning: &str) -> String {
        format!(
            r#"The judge has delivered the final verdict.
Conclusion: {conclusion}
Reasoning: {reasoning}

Reply with JSON using the keys "agreement" ("agree" or "disagree") and optional "comment" (under 40 words)."#
        )
    }

    /// Corrective turn after a consensus reply that failed to parse
    pub fn consensus_retry() -> &'static str {
        r#"The previous reply was not valid JSON. Respond again using only JSON with the keys "agreement" ("agree" or "disagree") and optional "comment"."#
    }

    /// System prompt for the judge
    pub fn judge_system(judge_label: &str, operator_context: &str) -> String {
        let prompt = format!(
            r#"You are {judge_label}, an impartial arbiter who reviews debate transcripts and settles the answer for the user.
You must:
1. Check whether the apparent winner's claims are accurate and well argued.
2. Write the best answer yourself when there is no single winner.
3. Explain your reasoning briefly.
Reply with strict JSON so the verdict can be parsed automatically."#
        );
        with_operator_context(prompt, operator_context)
    }

    /// User turn carrying the whole debate to the judge
    pub fn judge_request(
        submission: &str,
        provisional_winner: Option<&str>,
        transcript: &str,
        positions: &str,
    ) -> String {
        format!(
            r#"Review the debate below and deliver the final verdict.

User submission:
{}

Debate transcript:
{}

Latest positions:
{}

Apparent winner after the debate rounds: {}

Reply in JSON with the keys:
- "verdict": "approved" (winner confirmed), "rejected" (winner wrong, give the correction), or "no_winner" (you write the answer).
- "conclusion": your final answer for the user.
- "reasoning": a short fact-check summary (under 120 words).
- "winner": the participant you validated or corrected (null if none)."#,
            submission.trim(),
            transcript,
            positions,
            provisional_winner.unwrap_or("None")
        )
    }

    /// System prompt for the writer producing the user-facing answer
    pub fn writer_system(writer_label: &str, operator_context: &str) -> String {
        let prompt = format!(
            r#"You are {writer_label}, preparing the response for the end user.
Give one clear, direct answer based on the validated verdict.
Do not mention the debate or use the word "verdict".
Reply in plain Markdown without surrounding JSON or metadata."#
        );
        with_operator_context(prompt, operator_context)
    }

    /// User turn for the writer.
    ///
    /// `winner` carries the winning participant's label and final statement;
    /// when absent the judge's conclusion is the decisive source.
    pub fn writer_request(
        submission: &str,
        verdict_summary: &str,
        judge_conclusion: &str,
        winner: Option<(&str, &str)>,
    ) -> String {
        let decisive_source = match winner {
            Some((label, statement)) => {
                format!("Winning participant ({}) statement:\n{}", label, statement)
            }
            None => format!("Judge conclusion:\n{}", judge_conclusion),
        };

        format!(
            r#"Write the final answer for the user.

User prompt:
{}

Verified verdict summary:
{}

{}

Requirements:
- Give only the direct answer the user needs.
- Leave out debate logistics, participant names, and vote counts.
- Keep it coherent; use Markdown where it helps."#,
            submission.trim(),
            verdict_summary.trim(),
            decisive_source
        )
    }
}

fn with_operator_context(prompt: String, operator_context: &str) -> String {
    let context = operator_context.trim();
    if context.is_empty() {
        prompt
    } else {
        format!("{}\n\nOperator context to honor:\n{}", prompt, context)
    }
}
