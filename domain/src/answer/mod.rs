//! Answer domain
//!
//! The canned answer pool and the outcome of a single resolution.

pub mod outcome;
pub mod pool;

pub use outcome::{AnswerSource, ResolutionOutcome};
pub use pool::{AnswerPool, DEFAULT_ANSWERS};
