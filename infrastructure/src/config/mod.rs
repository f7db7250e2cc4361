//! Configuration file loading for book-of-answers
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./book-of-answers.toml` or `./.book-of-answers.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/book-of-answers/config.toml`
//! 4. `BOOK_OF_ANSWERS_*` environment variables
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileAnthropicConfig, FileConfig, FileOpenAiConfig, FileOracleConfig,
    FileProvidersConfig, Severity,
};
pub use loader::{APP_DIR, ConfigLoader, ENV_PREFIX};
