//! Application layer for book-of-answers
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod cancellation;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use cancellation::RequestCancellation;
pub use config::OracleParams;
pub use ports::{
    oracle_client::{OracleClient, OracleError},
    phase_notifier::{NoPhaseNotifier, PhaseNotifier},
    settings_repository::{
        NoSettingsRepository, SettingsRepository, SettingsStoreError, StoredSettings,
    },
};
pub use use_cases::phase_controller::PhaseController;
pub use use_cases::resolve_answer::{AnswerResolver, ResolverSnapshot, classify_error, messages};
pub use use_cases::settings_store::SettingsStore;
