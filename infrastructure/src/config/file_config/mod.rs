//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

mod oracle;
mod providers;

pub use oracle::FileOracleConfig;
pub use providers::{FileAnthropicConfig, FileOpenAiConfig, FileProvidersConfig};

use serde::{Deserialize, Serialize};

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending field
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Timing and answer pool
    pub oracle: FileOracleConfig,
    /// Provider endpoints and request parameters
    pub providers: FileProvidersConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.oracle.timeout_ms == 0 {
            issues.push(ConfigIssue::warning(
                "oracle.timeout_ms",
                "oracle.timeout_ms is 0: every AI request will time out immediately",
            ));
        }

        let blank = self
            .oracle
            .answers
            .iter()
            .filter(|a| a.trim().is_empty())
            .count();
        if !self.oracle.answers.is_empty() && blank == self.oracle.answers.len() {
            issues.push(ConfigIssue::error(
                "oracle.answers",
                "oracle.answers contains only blank entries",
            ));
        } else if blank > 0 {
            issues.push(ConfigIssue::warning(
                "oracle.answers",
                format!("oracle.answers: {} blank entries will be ignored", blank),
            ));
        }

        let mut seen: Vec<&str> = Vec::new();
        let mut duplicates = 0;
        for answer in self.oracle.answers.iter().map(|a| a.trim()) {
            if answer.is_empty() {
                continue;
            }
            if seen.contains(&answer) {
                duplicates += 1;
            } else {
                seen.push(answer);
            }
        }
        if duplicates > 0 {
            issues.push(ConfigIssue::warning(
                "oracle.answers",
                format!("oracle.answers: {} repeated entries will be ignored", duplicates),
            ));
        }

        for (field, url) in [
            ("providers.openai.base_url", &self.providers.openai.base_url),
            (
                "providers.anthropic.base_url",
                &self.providers.anthropic.base_url,
            ),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                issues.push(ConfigIssue::warning(
                    field,
                    format!("{}: '{}' is not an http(s) URL", field, url),
                ));
            }
        }

        issues
    }
}
