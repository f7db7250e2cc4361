//! Domain layer for book-of-answers
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Answer pool**: the canned phrases the oracle falls back to
//! - **Settings**: provider selection and the user's API key
//! - **Phase**: where the user is in the ask / respond cycle
//! - **Cancel reason**: why a pending oracle request was abandoned

pub mod answer;
pub mod core;
pub mod interaction;
pub mod prompt;
pub mod settings;

// Re-export commonly used types
pub use answer::{AnswerPool, AnswerSource, DEFAULT_ANSWERS, ResolutionOutcome};
pub use crate::core::{error::DomainError, question::Question};
pub use interaction::{CancelReason, Phase};
pub use prompt::PromptTemplate;
pub use settings::{ANTHROPIC_KEY_PREFIX, AiConfig, Provider, Settings};
