//! Oracle parameters: resolution timing control.
//!
//! [`OracleParams`] groups the static timings used by
//! [`AnswerResolver`](crate::use_cases::resolve_answer::AnswerResolver) and
//! [`PhaseController`](crate::use_cases::phase_controller::PhaseController).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default time the provider has to answer before the pool takes over
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Default time an error message stays visible
pub const DEFAULT_ERROR_DISPLAY: Duration = Duration::from_millis(4_000);

/// Resolution timing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleParams {
    /// How long a provider call may take before it is cancelled.
    pub timeout: Duration,
    /// How long a user-facing error message is shown before it clears.
    pub error_display: Duration,
}

impl Default for OracleParams {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            error_display: DEFAULT_ERROR_DISPLAY,
        }
    }
}

impl OracleParams {
    // ==================== Builder Methods ====================

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_error_display(mut self, duration: Duration) -> Self {
        self.error_display = duration;
        self
    }
}
