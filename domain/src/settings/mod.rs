//! Settings domain
//!
//! Provider selection, the user's API key, and the per-request
//! [`AiConfig`] snapshot derived from them.

pub mod entities;
pub mod provider;

pub use entities::{AiConfig, Settings};
pub use provider::{ANTHROPIC_KEY_PREFIX, Provider};
