//! Application-level configuration.
//!
//! - [`OracleParams`]: resolution timeout and error display duration

pub mod oracle_params;

pub use oracle_params::OracleParams;
