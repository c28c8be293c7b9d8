//! REPL (Read-Eval-Print Loop) for interactive debates

use crate::output::console::ConsoleFormatter;
use crate::output::formatter::OutputFormatter;
use crate::progress::reporter::ProgressReporter;
use colored::Colorize;
use debate_application::{LlmGateway, RunDebateInput, RunDebateUseCase};
use debate_domain::{ConversationHistory, Message, OutputFormat, Question};
use debate_infrastructure::ConversationStore;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;

/// A slash command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// `/q`: clear the active transcript and exit
    Quit,
    /// `/s`: save the markdown record
    SaveMarkdown,
    /// `/d`: save the reloadable data file
    SaveData,
    /// `/a`: save both
    SaveAll,
    /// `/c`: delete saved conversations
    ClearSaved,
    /// `/i`: debate the prompt from the user-input file
    FromInputFile,
    /// `/h <id>`: reload a saved conversation
    History(String),
    /// `/help`
    Help,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`; anything else is not a command
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        Some(match name.to_lowercase().as_str() {
            "q" | "quit" | "exit" => ReplCommand::Quit,
            "s" | "save" => ReplCommand::SaveMarkdown,
            "d" | "data" => ReplCommand::SaveData,
            "a" | "all" => ReplCommand::SaveAll,
            "c" | "clear" => ReplCommand::ClearSaved,
            "i" | "input" => ReplCommand::FromInputFile,
            "h" | "history" => ReplCommand::History(arg.to_string()),
            "help" | "?" => ReplCommand::Help,
            _ => ReplCommand::Unknown(line.to_string()),
        })
    }
}

/// Interactive debate REPL
///
/// Keeps the outer conversation (system prompt, user turns and one full
/// session record per turn) and mirrors it into the active transcript file
/// after every debate.
pub struct ChatRepl<G: LlmGateway + 'static> {
    use_case: RunDebateUseCase<G>,
    store: ConversationStore,
    conversation: ConversationHistory,
    conversation_id: u64,
    system_prompt: String,
    output_format: OutputFormat,
    show_progress: bool,
    history_path: Option<PathBuf>,
}

impl<G: LlmGateway + 'static> ChatRepl<G> {
    /// Create a new ChatRepl
    pub fn new(use_case: RunDebateUseCase<G>, store: ConversationStore) -> Self {
        let conversation_id = store.next_conversation_id(0);
        Self {
            use_case,
            store,
            conversation: ConversationHistory::new(),
            conversation_id,
            system_prompt: String::new(),
            output_format: OutputFormat::Answer,
            show_progress: true,
            history_path: None,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Set how each finished session is printed
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set the line-editor history file
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    pub fn conversation(&self) -> &ConversationHistory {
        &self.conversation
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            self.ensure_system_message();

            let readline = rl.readline("User: ");
            let line = match readline {
                Ok(line) => line.trim().to_string(),
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    self.clear_active();
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            };

            if !line.is_empty() {
                let _ = rl.add_history_entry(line.as_str());
            }

            let prompt = match ReplCommand::parse(&line) {
                Some(ReplCommand::Quit) => {
                    self.clear_active();
                    println!("Bye!");
                    break;
                }
                Some(ReplCommand::FromInputFile) => self.store.read_user_input(),
                Some(command) => {
                    self.handle_command(command);
                    continue;
                }
                None => line,
            };

            if prompt.trim().is_empty() {
                println!("{}", "No prompt provided. Try again.".yellow());
                continue;
            }

            self.process_question(&prompt).await;
        }

        if let Some(ref path) = self.history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// A fresh conversation starts with the system prompt from disk
    fn ensure_system_message(&mut self) {
        if self.conversation.is_empty() {
            self.system_prompt = self.store.load_system_prompt();
            self.conversation
                .push(Message::system(self.system_prompt.clone()));
        }
    }

    fn print_welcome(&self) {
        let config = self.use_case.config();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          Quorum Debate - Chat Mode          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Participants: {}",
            config
                .roster
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("Judge: {}   Writer: {}", config.judge, config.writer);
        println!("Conversation id: {}", self.conversation_id);
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /s        - Save conversation as markdown");
        println!("  /d        - Save conversation data");
        println!("  /a        - Save both");
        println!("  /c        - Clear saved conversations");
        println!("  /i        - Debate the prompt in the user-input file");
        println!("  /h <id>   - Load a saved conversation");
        println!("  /help     - Show this help");
        println!("  /q        - Exit chat");
        println!();
    }

    fn handle_command(&mut self, command: ReplCommand) {
        match command {
            ReplCommand::SaveMarkdown => self.save_markdown(),
            ReplCommand::SaveData => self.save_data(),
            ReplCommand::SaveAll => {
                self.save_markdown();
                self.save_data();
            }
            ReplCommand::ClearSaved => match self.store.clear_saved() {
                Ok(count) => println!("Cleared {} saved conversation files", count),
                Err(e) => eprintln!("{}", format!("Error clearing conversations: {}", e).red()),
            },
            ReplCommand::History(id) => self.load_history(&id),
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
            ReplCommand::Quit | ReplCommand::FromInputFile => {}
        }
    }

    fn save_markdown(&self) {
        match self
            .store
            .save_markdown(&self.conversation, self.conversation_id)
        {
            Ok(path) => println!("Conversation saved to {}", path.display()),
            Err(e) => eprintln!("{}", format!("Error saving conversation: {}", e).red()),
        }
    }

    fn save_data(&self) {
        match self.store.save_data(&self.conversation, self.conversation_id) {
            Ok(path) => println!("Conversation data saved to {}", path.display()),
            Err(e) => eprintln!("{}", format!("Error saving conversation data: {}", e).red()),
        }
    }

    fn load_history(&mut self, id: &str) {
        match self.store.load_data(id) {
            Ok(conversation) => {
                self.system_prompt = conversation.system_prompt().unwrap_or("").to_string();
                self.conversation = conversation;
                println!(
                    "Loaded conversation {} ({} messages)",
                    id,
                    self.conversation.len()
                );
                self.write_active();
            }
            Err(e) => eprintln!("{}", format!("Error loading conversation: {}", e).red()),
        }
    }

    fn write_active(&self) {
        if let Err(e) = self.store.write_active(&self.conversation) {
            eprintln!("{}", format!("Error saving conversation: {}", e).red());
        }
    }

    fn clear_active(&self) {
        if let Err(e) = self.store.clear_active() {
            eprintln!("{}", format!("Error clearing conversation: {}", e).red());
        }
    }

    async fn process_question(&mut self, prompt: &str) {
        println!();

        let question = match Question::parse(prompt) {
            Ok(question) => question,
            Err(e) => {
                println!("{}", format!("Debate error: {}", e).red());
                return;
            }
        };
        let input = RunDebateInput::new(question).with_operator_context(self.system_prompt.clone());

        let result = if self.show_progress {
            let progress = ProgressReporter::new();
            self.use_case.execute_with_progress(input, &progress).await
        } else {
            self.use_case.execute(input).await
        };

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                println!("{}", format!("Debate error: {}", e).red());
                return;
            }
        };

        self.conversation.push_user(prompt);
        self.conversation
            .push_assistant(ConsoleFormatter::session_record(&self.system_prompt, &result));

        let rendered = ConsoleFormatter.render(self.output_format, &self.system_prompt, &result);
        println!("{} {}", "Assistant:".green(), rendered.green());
        println!();

        self.write_active();
    }
}
