//! Progress indicators

pub mod contemplating;

pub use contemplating::{CONTEMPLATING_PHRASES, ContemplatingSpinner, PHRASE_INTERVAL, PhraseCycle};
