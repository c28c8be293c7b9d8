//! Output formatter trait

use debate_domain::{OutputFormat, SessionResult};

/// Trait for formatting debate session results
pub trait OutputFormatter {
    /// Every section of the session, headed by the active system prompt
    fn format_full(&self, system_prompt: &str, result: &SessionResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &SessionResult) -> String;

    /// Only the answer meant for the user
    fn format_answer(&self, result: &SessionResult) -> String;

    /// Dispatch on a configured [`OutputFormat`]
    fn render(&self, format: OutputFormat, system_prompt: &str, result: &SessionResult) -> String {
        match format {
            OutputFormat::Full => self.format_full(system_prompt, result),
            OutputFormat::Answer => self.format_answer(result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}
