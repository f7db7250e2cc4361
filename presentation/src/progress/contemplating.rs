//! Spinner shown while the book is contemplating

use boa_application::PhaseNotifier;
use boa_domain::Phase;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

/// Phrases cycled through while an answer is pending
pub const CONTEMPLATING_PHRASES: [&str; 4] = [
    "The book is contemplating…",
    "The pages are turning…",
    "Seeking wisdom…",
    "The oracle ponders…",
];

/// Time each phrase stays on screen
pub const PHRASE_INTERVAL: Duration = Duration::from_millis(2500);

const SPINNER_TICK: Duration = Duration::from_millis(100);

/// Position in [`CONTEMPLATING_PHRASES`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PhraseCycle {
    index: usize,
}

impl PhraseCycle {
    pub fn current(&self) -> &'static str {
        CONTEMPLATING_PHRASES[self.index]
    }

    /// Move to the next phrase, wrapping around
    pub fn advance(&mut self) -> &'static str {
        self.index = (self.index + 1) % CONTEMPLATING_PHRASES.len();
        self.current()
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[derive(Default)]
struct SpinnerState {
    bar: Option<ProgressBar>,
    ticker: Option<JoinHandle<()>>,
}

/// Shows a spinner with rotating phrases during [`Phase::Contemplating`]
/// and clears it as soon as the phase moves on.
pub struct ContemplatingSpinner {
    state: Mutex<SpinnerState>,
    hidden: bool,
}

impl ContemplatingSpinner {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SpinnerState::default()),
            hidden: false,
        }
    }

    /// A spinner that never draws; used in tests
    pub fn hidden() -> Self {
        Self {
            state: Mutex::new(SpinnerState::default()),
            hidden: true,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.cyan} {msg:.italic}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn lock(&self) -> MutexGuard<'_, SpinnerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Message currently on the spinner, if it is running
    pub fn message(&self) -> Option<String> {
        self.lock().bar.as_ref().map(ProgressBar::message)
    }

    pub fn is_spinning(&self) -> bool {
        self.lock().bar.is_some()
    }

    fn start(&self) {
        let mut state = self.lock();
        // A superseding request keeps the running spinner
        if state.bar.is_some() {
            return;
        }

        let bar = if self.hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        bar.set_style(Self::style());
        let mut cycle = PhraseCycle::default();
        bar.set_message(cycle.current());
        bar.enable_steady_tick(SPINNER_TICK);

        state.ticker = tokio::runtime::Handle::try_current().ok().map(|handle| {
            let bar = bar.clone();
            handle.spawn(async move {
                loop {
                    tokio::time::sleep(PHRASE_INTERVAL).await;
                    bar.set_message(cycle.advance());
                }
            })
        });
        state.bar = Some(bar);
    }

    fn stop(&self) {
        let mut state = self.lock();
        if let Some(ticker) = state.ticker.take() {
            ticker.abort();
        }
        if let Some(bar) = state.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Default for ContemplatingSpinner {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseNotifier for ContemplatingSpinner {
    fn on_phase_change(&self, phase: Phase) {
        trace!("Phase changed to {}", phase);
        match phase {
            Phase::Contemplating => self.start(),
            Phase::Asking | Phase::Answered => self.stop(),
        }
    }
}

impl Drop for ContemplatingSpinner {
    fn drop(&mut self) {
        self.stop();
    }
}
