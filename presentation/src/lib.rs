//! Presentation layer for book-of-answers
//!
//! This crate contains CLI definitions, output formatters,
//! the contemplating spinner, and the interactive REPL.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{OracleRepl, ReplCommand};
pub use cli::commands::Cli;
pub use output::console::{ConsoleFormatter, StatusView};
pub use progress::contemplating::ContemplatingSpinner;
