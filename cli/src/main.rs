//! CLI entrypoint for Quorum Debate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use debate_application::{ConversationLogger, RunDebateInput, RunDebateUseCase};
use debate_domain::{OutputFormat, Question, Severity};
use debate_infrastructure::{
    ConfigLoader, ConversationStore, FileConfig, JsonlConversationLogger,
    OpenAiCompatibleGateway, config::FileParticipant,
};
use debate_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputFormatter, ProgressReporter,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let _log_guard = init_logging(&cli)?;

    info!("Starting Quorum Debate");

    // === Configuration ===
    let mut file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    apply_cli_overrides(&mut file_config, &cli);

    if cli.no_color || !file_config.output.color {
        colored::control::set_override(false);
    }

    for issue in file_config.validate() {
        if issue.severity == Severity::Warning {
            warn!("{}", issue.message);
        }
    }
    let debate_config = file_config.to_debate_config()?;
    for issue in debate_config.check() {
        warn!("{}", issue.message);
    }

    let output_format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(file_config.output.format)
        .unwrap_or_default();
    let show_progress = !cli.quiet && file_config.repl.show_progress;

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiCompatibleGateway::from_config(&file_config.provider)?);

    let mut use_case = RunDebateUseCase::new(gateway, debate_config);
    if let Some(path) = &cli.conversation_log {
        let session_id = chrono::Utc::now().format("%Y%m%dT%H%M%S").to_string();
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                let logger: Arc<dyn ConversationLogger> =
                    Arc::new(logger.with_session_id(session_id));
                use_case = use_case.with_conversation_logger(logger);
            }
            None => warn!("Conversation log disabled"),
        }
    }

    let store = ConversationStore::new(file_config.storage.to_layout());

    // Chat mode
    if cli.chat {
        let history_file = file_config
            .repl
            .history_file
            .as_ref()
            .map(PathBuf::from)
            .or_else(ConfigLoader::default_history_path);

        let mut repl = ChatRepl::new(use_case, store)
            .with_progress(show_progress)
            .with_output_format(output_format)
            .with_history_file(history_file);

        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let Some(question) = cli.question.as_deref() else {
        bail!("Question is required. Use --chat for interactive mode.");
    };
    let question = Question::parse(question)?;
    let system_prompt = store.load_system_prompt();

    if show_progress {
        println!();
        println!("+============================================================+");
        println!("|              Quorum Debate - Multi-Agent Debate            |");
        println!("+============================================================+");
        println!();
        println!("Question: {}", question);
        println!(
            "Participants: {}",
            use_case
                .config()
                .roster
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
    }

    let input = RunDebateInput::new(question).with_operator_context(system_prompt.clone());
    let result = if show_progress {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    } else {
        use_case.execute(input).await?
    };

    println!(
        "{}",
        ConsoleFormatter.render(output_format, &system_prompt, &result)
    );

    Ok(())
}

/// Install the tracing subscriber.
///
/// Verbosity picks the level (warn / info / debug / trace). With `--log-dir`
/// logs go to a daily-rolling file instead of stderr; the returned guard
/// must live until exit so buffered lines are flushed.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match &cli.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "quorum-debate.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            Ok(None)
        }
    }
}

/// Layer command-line flags over the loaded configuration
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if !cli.participants.is_empty() {
        config.debate.participants = cli
            .participants
            .iter()
            .map(|p| FileParticipant {
                label: p.label.clone(),
                model: p.model.clone(),
            })
            .collect();
    }
    if let Some(model) = &cli.judge_model {
        config.judge.model = Some(model.clone());
    }
    if let Some(model) = &cli.writer_model {
        config.writer.model = Some(model.clone());
    }
    if let Some(max_rounds) = cli.max_rounds {
        config.debate.max_rounds = max_rounds;
    }
    if let Some(path) = &cli.system_file {
        config.storage.system_prompt_file = path.to_string_lossy().into_owned();
    }
}
