//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for a finished debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Verdict, final answer, votes and transcript
    Full,
    /// Only the final answer
    Answer,
    /// The whole session result as JSON
    Json,
}

impl From<OutputFormat> for debate_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => debate_domain::OutputFormat::Full,
            OutputFormat::Answer => debate_domain::OutputFormat::Answer,
            OutputFormat::Json => debate_domain::OutputFormat::Json,
        }
    }
}

/// A `LABEL=MODEL` pair given with `--participant`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantArg {
    pub label: String,
    pub model: String,
}

/// Parse `LABEL=MODEL`; a bare `MODEL` uses the model as its own label
pub fn parse_participant(value: &str) -> Result<ParticipantArg, String> {
    let (label, model) = match value.split_once('=') {
        Some((label, model)) => (label.trim(), model.trim()),
        None => (value.trim(), value.trim()),
    };
    if label.is_empty() || model.is_empty() {
        return Err(format!("expected LABEL=MODEL, got '{}'", value));
    }
    Ok(ParticipantArg {
        label: label.to_string(),
        model: model.to_string(),
    })
}

/// CLI arguments for quorum-debate
#[derive(Parser, Debug)]
#[command(name = "quorum-debate")]
#[command(author, version, about = "Multi-agent LLM debate - several models argue, a judge decides")]
#[command(long_about = r#"
Quorum Debate runs a structured debate between several LLMs.

A session has five stages:
1. Round 1: every participant answers your question
2. Rounds 2..N: participants rebut each other until all but one concede
3. Adjudication: a judge reviews the transcript and issues a verdict
4. Consensus: every participant votes on the verdict
5. Synthesis: a writer turns the verdict into the final answer

Configuration files are loaded from (in priority order):
1. DEBATE_* environment variables (e.g. DEBATE_DEBATE__MAX_ROUNDS=2)
2. --config <path>     Explicit config file
3. ./debate.toml       Project-level config
4. ~/.config/quorum-debate/config.toml   Global config

Example:
  quorum-debate "Is Rust's borrow checker worth the learning curve?"
  quorum-debate -p Atlas=gpt-5 -p Boreas=gpt-4o --max-rounds 2 "Tabs or spaces?"
  quorum-debate --chat
"#)]
pub struct Cli {
    /// The question to debate (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Debate participant as LABEL=MODEL (can be specified multiple times)
    #[arg(short, long = "participant", value_name = "LABEL=MODEL", value_parser = parse_participant)]
    pub participants: Vec<ParticipantArg>,

    /// Model used by the judge
    #[arg(long, value_name = "MODEL")]
    pub judge_model: Option<String>,

    /// Model used by the writer of the final answer
    #[arg(long, value_name = "MODEL")]
    pub writer_model: Option<String>,

    /// Maximum number of debate rounds, round 1 included
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<u32>,

    /// Output format (defaults to `[output] format`, then `answer`)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// System prompt file shared by every agent (overrides `[storage] system_prompt_file`)
    #[arg(long, value_name = "PATH")]
    pub system_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to a daily-rolling file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Append structured debate events (JSONL) to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,
}
