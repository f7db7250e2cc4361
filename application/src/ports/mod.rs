//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod oracle_client;
pub mod phase_notifier;
pub mod settings_repository;
