//! Prompt domain
//!
//! The fixed system instruction that keeps the oracle terse.

mod template;

pub use template::{PromptTemplate, STYLE_EXAMPLES};
