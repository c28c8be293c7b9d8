//! Console output formatter for debate results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use debate_domain::SessionResult;

const NO_SYSTEM: &str = "(none)";
const NO_VERDICT: &str = "[No verdict provided]";
const NO_FINAL_ANSWER: &str = "[No final answer provided]";
const NO_VOTES: &str = "[No votes recorded]";
const NO_TRANSCRIPT: &str = "[No transcript available]";

/// Formats debate results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// The plain-text record kept in the conversation history.
    ///
    /// Sections: SYSTEM, USER MESSAGE, VERDICT, FINAL ANSWER, VOTES and
    /// TRANSCRIPT. Empty sections get a bracketed placeholder.
    pub fn session_record(system_prompt: &str, result: &SessionResult) -> String {
        let sections = [
            ("SYSTEM", or_placeholder(system_prompt, NO_SYSTEM)),
            ("USER MESSAGE", result.question.trim()),
            ("VERDICT", or_placeholder(&result.verdict_text, NO_VERDICT)),
            (
                "FINAL ANSWER",
                or_placeholder(&result.final_answer, NO_FINAL_ANSWER),
            ),
            ("VOTES", or_placeholder(&result.votes_text, NO_VOTES)),
            (
                "TRANSCRIPT",
                or_placeholder(&result.transcript_text, NO_TRANSCRIPT),
            ),
        ];

        sections
            .iter()
            .map(|(title, body)| format!("## {}\n{}", title, body))
            .collect::<Vec<_>>()
            .join("\n\n")
            .trim()
            .to_string()
    }

    /// The full record with highlighted section headings
    pub fn format_full(system_prompt: &str, result: &SessionResult) -> String {
        let record = Self::session_record(system_prompt, result);
        let mut output = String::new();

        output.push_str(&Self::header("Debate Results"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}   {} {}   {} {}\n\n",
            "Rounds:".cyan().bold(),
            result.rounds,
            "Votes:".cyan().bold(),
            result.consensus.vote_summary(),
            "Provisional winner:".cyan().bold(),
            result.provisional_winner.as_deref().unwrap_or("none")
        ));

        for line in record.lines() {
            if line.starts_with("## ") {
                output.push_str(&format!("{}\n", line.yellow().bold()));
            } else {
                output.push_str(line);
                output.push('\n');
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(result: &SessionResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// The final answer, falling back to the verdict block
    pub fn format_answer(result: &SessionResult) -> String {
        let answer = result.final_answer.trim();
        if !answer.is_empty() {
            return answer.to_string();
        }
        or_placeholder(&result.verdict_text, NO_VERDICT).to_string()
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    let text = text.trim();
    if text.is_empty() { placeholder } else { text }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, system_prompt: &str, result: &SessionResult) -> String {
        Self::format_full(system_prompt, result)
    }

    fn format_json(&self, result: &SessionResult) -> String {
        Self::format_json(result)
    }

    fn format_answer(&self, result: &SessionResult) -> String {
        Self::format_answer(result)
    }
}
