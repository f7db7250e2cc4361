//! Interaction domain
//!
//! The ask / respond phase machine and the reasons a pending request can
//! be cancelled.

pub mod cancel_reason;
pub mod phase;

pub use cancel_reason::CancelReason;
pub use phase::Phase;
