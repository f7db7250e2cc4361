//! Reason-carrying cancellation for oracle requests.
//!
//! A plain [`CancellationToken`] only says *that* a request was abandoned.
//! The resolver also needs to know *why*: a timeout falls back to the pool
//! with a message, while a user cancel is discarded silently.

use boa_domain::CancelReason;
use std::sync::{Arc, Mutex, PoisonError};
use tokio_util::sync::CancellationToken;

/// Cancellation handle shared by the timer, the client call and the resolver.
///
/// The reason is recorded before the token fires, so anyone woken by the
/// token already sees it. A [`CancelReason::User`] always replaces a
/// recorded [`CancelReason::Timeout`]; the reverse never happens.
#[derive(Debug, Clone, Default)]
pub struct RequestCancellation {
    token: CancellationToken,
    reason: Arc<Mutex<Option<CancelReason>>>,
}

impl RequestCancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel with the given reason. Returns whether the reason was recorded.
    pub fn cancel(&self, reason: CancelReason) -> bool {
        let recorded = {
            let mut slot = self.reason.lock().unwrap_or_else(PoisonError::into_inner);
            if reason.overrides(*slot) {
                *slot = Some(reason);
                true
            } else {
                false
            }
        };
        self.token.cancel();
        recorded
    }

    /// The winning reason, if cancelled
    pub fn reason(&self) -> Option<CancelReason> {
        *self.reason.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Token handed to the client for cooperative checks
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Wait until cancelled, for any reason
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_not_cancelled() {
        let cancellation = RequestCancellation::new();
        assert!(!cancellation.is_cancelled());
        assert_eq!(cancellation.reason(), None);
    }

    #[test]
    fn test_cancel_records_reason_and_fires_token() {
        let cancellation = RequestCancellation::new();
        let token = cancellation.token().clone();

        assert!(cancellation.cancel(CancelReason::Timeout));
        assert!(token.is_cancelled());
        assert_eq!(cancellation.reason(), Some(CancelReason::Timeout));
    }

    #[test]
    fn test_user_cancel_takes_precedence_over_timeout() {
        let cancellation = RequestCancellation::new();
        cancellation.cancel(CancelReason::Timeout);
        assert!(cancellation.cancel(CancelReason::User));
        assert_eq!(cancellation.reason(), Some(CancelReason::User));
    }

    #[test]
    fn test_timeout_never_replaces_user_cancel() {
        let cancellation = RequestCancellation::new();
        cancellation.cancel(CancelReason::User);
        assert!(!cancellation.cancel(CancelReason::Timeout));
        assert_eq!(cancellation.reason(), Some(CancelReason::User));
    }

    #[test]
    fn test_clones_share_state() {
        let cancellation = RequestCancellation::new();
        let clone = cancellation.clone();
        clone.cancel(CancelReason::User);
        assert!(cancellation.is_cancelled());
        assert_eq!(cancellation.reason(), Some(CancelReason::User));
    }

    #[tokio::test]
    async fn test_cancelled_future_wakes() {
        let cancellation = RequestCancellation::new();
        let waiter = cancellation.clone();
        let handle = tokio::spawn(async move {
            waiter.cancelled().await;
            waiter.reason()
        });
        cancellation.cancel(CancelReason::Timeout);
        assert_eq!(handle.await.unwrap(), Some(CancelReason::Timeout));
    }
}
