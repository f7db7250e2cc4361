//! CLI command definitions

use boa_domain::Provider;
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for book-of-answers
#[derive(Parser, Debug)]
#[command(name = "book-of-answers")]
#[command(author, version, about = "Ask a question, get an answer from the book")]
#[command(long_about = r#"
The Book of Answers replies to any question with a short, cryptic answer.

With an API key configured the answer is written by an AI model (OpenAI or
Anthropic). Without one, or when the model cannot be reached, the answer is
drawn at random from the book's built-in pages.

Run without a question to open the book interactively.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./book-of-answers.toml       Project-level config
3. ~/.config/book-of-answers/config.toml   Global config

Example:
  book-of-answers "Should I take the job?"
  book-of-answers --set-key sk-ant-...
  book-of-answers --offline "Will it rain tomorrow?"
"#)]
pub struct Cli {
    /// The question to ask (omit to start interactive mode)
    pub question: Option<String>,

    /// Store an API key (the provider is detected from its prefix)
    #[arg(long, value_name = "KEY", conflicts_with = "clear_key")]
    pub set_key: Option<String>,

    /// Remove the stored API key
    #[arg(long)]
    pub clear_key: bool,

    /// Select and store the AI provider
    #[arg(long, value_name = "PROVIDER", value_parser = parse_provider)]
    pub provider: Option<Provider>,

    /// Always answer from the book, even when a key is configured
    #[arg(long)]
    pub offline: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// True when the invocation only changes settings
    pub fn is_settings_only(&self) -> bool {
        self.question.is_none()
            && (self.set_key.is_some() || self.clear_key || self.provider.is_some())
    }
}

fn parse_provider(s: &str) -> Result<Provider, String> {
    s.parse().map_err(|e: boa_domain::DomainError| e.to_string())
}
