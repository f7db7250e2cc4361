//! Infrastructure layer for book-of-answers
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use providers::{HttpOracleClient, anthropic::AnthropicClient, openai::OpenAiClient};
pub use storage::TomlSettingsRepository;
