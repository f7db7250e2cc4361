//! Console output formatter for answers and status

use colored::Colorize;
use boa_domain::{AnswerSource, Phase, Provider, ResolutionOutcome};

/// What `/status` and `--show-config` report about the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub provider: Provider,
    pub masked_key: Option<String>,
    pub offline: bool,
    pub phase: Phase,
    pub error_message: Option<String>,
}

/// Formats answers for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format an answer, with its error message underneath when there is one
    pub fn format_outcome(outcome: &ResolutionOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n  {}\n", outcome.answer.bold().yellow()));

        if let Some(message) = &outcome.error_message {
            output.push_str(&format!("\n  {} {}\n", "!".red().bold(), message.dimmed()));
        }

        output
    }

    /// Answer only, for scripting (`--quiet`)
    pub fn format_plain(outcome: &ResolutionOutcome) -> String {
        outcome.answer.clone()
    }

    pub fn format_error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    pub fn format_notice(message: &str) -> String {
        format!("{} {}", "->".cyan(), message)
    }

    pub fn format_status(status: &StatusView) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header("Status"));
        output.push_str(&format!(
            "  {:<10} {}\n",
            "Provider:".bold(),
            status.provider.display_name()
        ));
        output.push_str(&format!(
            "  {:<10} {}\n",
            "API key:".bold(),
            status
                .masked_key
                .as_deref()
                .map(|k| k.normal())
                .unwrap_or_else(|| "not set".dimmed())
        ));
        output.push_str(&format!("  {:<10} {}\n", "Source:".bold(), Self::mode(status)));
        output.push_str(&format!("  {:<10} {}\n", "Phase:".bold(), status.phase));

        if let Some(message) = &status.error_message {
            output.push_str(&format!("  {:<10} {}\n", "Last error:".bold(), message.red()));
        }

        output
    }

    fn mode(status: &StatusView) -> &'static str {
        match (status.offline, status.masked_key.is_some()) {
            (true, _) => "the book only (offline)",
            (false, true) => "the oracle, falling back to the book",
            (false, false) => "the book only (no API key)",
        }
    }

    /// Short label for where an answer came from
    pub fn source_label(source: AnswerSource) -> &'static str {
        match source {
            AnswerSource::Oracle => "oracle",
            AnswerSource::Pool => "book",
        }
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
