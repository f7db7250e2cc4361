//! Phase notification port
//!
//! Lets presentation layers react when the ask / respond cycle moves on.

use boa_domain::Phase;

/// Callback for phase changes
///
/// Implementations live in the presentation layer (spinners, status lines).
/// Only changes made by the current request are reported; superseded
/// requests never notify.
pub trait PhaseNotifier: Send + Sync {
    /// Called after the phase has changed
    fn on_phase_change(&self, phase: Phase);
}

/// No-op notifier for when nobody is watching
pub struct NoPhaseNotifier;

impl PhaseNotifier for NoPhaseNotifier {
    fn on_phase_change(&self, _phase: Phase) {}
}
