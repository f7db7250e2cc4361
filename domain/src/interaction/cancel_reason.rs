//! Why an in-flight oracle request was cancelled

use serde::{Deserialize, Serialize};

/// Reason carried alongside a cancellation signal.
///
/// The resolver treats the two very differently: a timeout degrades to a
/// pool answer with a message, a user cancel is silently discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// A newer submission or an explicit "ask again" took over
    User,
    /// The request did not settle in time
    Timeout,
}

impl CancelReason {
    /// Whether `self` may replace an already recorded reason.
    ///
    /// A user cancel always wins over a timeout; a timeout never replaces
    /// anything.
    pub fn overrides(self, recorded: Option<CancelReason>) -> bool {
        match (self, recorded) {
            (_, None) => true,
            (CancelReason::User, Some(CancelReason::Timeout)) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for CancelReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CancelReason::User => write!(f, "cancelled by user"),
            CancelReason::Timeout => write!(f, "timed out"),
        }
    }
}
