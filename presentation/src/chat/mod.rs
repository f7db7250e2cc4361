//! Interactive mode
//!
//! A reedline-based prompt for asking the book one question after another.

mod command;
mod repl;

pub use command::{HELP, ReplCommand};
pub use repl::{OracleRepl, ReplStep};
