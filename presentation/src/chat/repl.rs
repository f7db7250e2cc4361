//! REPL (Read-Eval-Print Loop) for the interactive book

use super::command::{HELP, ReplCommand};
use crate::output::console::{ConsoleFormatter, StatusView};
use boa_application::PhaseController;
use boa_domain::Provider;
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

const HISTORY_SIZE: usize = 500;
const FAREWELL: &str = "The book closes. Farewell.";

/// Result of one REPL step
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReplStep {
    pub output: Option<String>,
    pub exit: bool,
}

impl ReplStep {
    fn say(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            exit: false,
        }
    }

    fn silent() -> Self {
        Self::default()
    }

    fn exit(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            exit: true,
        }
    }
}

/// Interactive book: ask questions, manage the key, read answers
pub struct OracleRepl {
    controller: Arc<PhaseController>,
    history_path: Option<PathBuf>,
}

impl OracleRepl {
    pub fn new(controller: Arc<PhaseController>) -> Self {
        Self {
            controller,
            history_path: dirs::data_dir()
                .map(|p| p.join("book-of-answers").join("history.txt")),
        }
    }

    /// Override (or disable) the history file
    pub fn with_history_path(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    /// Run the interactive REPL until `/quit` or Ctrl-D
    pub async fn run(&self) -> std::io::Result<()> {
        let mut editor = self.editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("book".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let Some(command) = ReplCommand::parse(&line) else {
                        continue;
                    };
                    let step = self.execute(command).await;
                    if let Some(output) = step.output {
                        println!("{}", output);
                    }
                    if step.exit {
                        break;
                    }
                }
                Signal::CtrlC => {
                    println!("^C");
                }
                Signal::CtrlD => {
                    println!("{}", FAREWELL);
                    break;
                }
            }
        }

        self.controller.cancel();
        Ok(())
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.history_path else {
            return editor;
        };

        if let Err(e) = ensure_parent_dir(path) {
            debug!("Could not create history directory for {}: {}", path.display(), e);
        }
        match FileBackedHistory::with_file(HISTORY_SIZE, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("History unavailable at {}: {}", path.display(), e);
                editor
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "╭─────────────────────────────────────────────╮".cyan());
        println!("{}", "│             The Book of Answers             │".cyan());
        println!("{}", "╰─────────────────────────────────────────────╯".cyan());
        println!();
        println!("Hold a question in your mind, then type it.");
        println!("{}", "Type /help for commands.".dimmed());
        println!();
    }

    /// Carry out one command
    pub async fn execute(&self, command: ReplCommand) -> ReplStep {
        debug!("REPL command: {:?}", command);
        match command {
            ReplCommand::Ask(question) => self.ask(&question).await,
            ReplCommand::Help => ReplStep::say(HELP),
            ReplCommand::Again => match self.controller.ask_again() {
                Ok(()) => ReplStep::say(ConsoleFormatter::format_notice(
                    "The book closes. Ask another question.",
                )),
                Err(e) => ReplStep::say(ConsoleFormatter::format_notice(&e.to_string())),
            },
            ReplCommand::Key(key) => self.set_key(&key),
            ReplCommand::Forget => {
                self.controller.settings().clear();
                ReplStep::say(ConsoleFormatter::format_notice(
                    "Key removed. Answers now come from the book.",
                ))
            }
            ReplCommand::Provider(name) => self.set_provider(&name),
            ReplCommand::Status => ReplStep::say(ConsoleFormatter::format_status(&self.status())),
            ReplCommand::Quit => ReplStep::exit(FAREWELL),
            ReplCommand::Unknown(name) => ReplStep::say(format!(
                "Unknown command: {}\nType /help for available commands",
                name
            )),
        }
    }

    async fn ask(&self, question: &str) -> ReplStep {
        let result = tokio::select! {
            result = self.controller.submit(question) => result,
            _ = tokio::signal::ctrl_c() => {
                self.controller.cancel();
                return ReplStep::say(ConsoleFormatter::format_notice("The question was withdrawn."));
            }
        };

        match result {
            Ok(Some(outcome)) => ReplStep::say(ConsoleFormatter::format_outcome(&outcome)),
            Ok(None) => ReplStep::silent(),
            Err(e) => ReplStep::say(ConsoleFormatter::format_error(&e.to_string())),
        }
    }

    fn set_key(&self, key: &str) -> ReplStep {
        if key.is_empty() {
            return ReplStep::say("Usage: /key <KEY>");
        }
        let provider = self.controller.settings().set_api_key(key);
        let mut message = format!("Key saved. Answers now come from {}.", provider.display_name());
        if self.controller.is_offline() {
            message.push_str(" (Offline mode: the book still answers.)");
        }
        ReplStep::say(ConsoleFormatter::format_notice(&message))
    }

    fn set_provider(&self, name: &str) -> ReplStep {
        if name.is_empty() {
            return ReplStep::say(format!(
                "Provider: {}\nUsage: /provider <openai|anthropic>",
                self.controller.settings().provider().display_name()
            ));
        }
        match name.parse::<Provider>() {
            Ok(provider) => {
                self.controller.settings().set_provider(provider);
                ReplStep::say(ConsoleFormatter::format_notice(&format!(
                    "Provider set to {}.",
                    provider.display_name()
                )))
            }
            Err(e) => ReplStep::say(ConsoleFormatter::format_error(&e.to_string())),
        }
    }

    fn status(&self) -> StatusView {
        let settings = self.controller.settings();
        StatusView {
            provider: settings.provider(),
            masked_key: settings.masked_key(),
            offline: self.controller.is_offline(),
            phase: self.controller.phase(),
            error_message: self.controller.error_message(),
        }
    }
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) => std::fs::create_dir_all(parent),
        None => Ok(()),
    }
}
