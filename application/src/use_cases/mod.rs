//! Use cases (application services)
//!
//! - [`resolve_answer`]: pool vs. oracle, timeout, error classification
//! - [`settings_store`]: provider and API key, persisted best-effort
//! - [`phase_controller`]: user intent in, phase / answer / error out

pub mod phase_controller;
pub mod resolve_answer;
pub mod settings_store;
