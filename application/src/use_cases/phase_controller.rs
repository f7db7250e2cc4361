//! Phase controller.
//!
//! Thin adapter between user intent (submit, ask again) and the
//! [`AnswerResolver`]. Presentation layers read phase, answer and error
//! message from here; the error message hides itself once its display
//! time is up.

use crate::use_cases::resolve_answer::AnswerResolver;
use crate::use_cases::settings_store::SettingsStore;
use boa_domain::{DomainError, Phase, Question, ResolutionOutcome};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct PhaseController {
    resolver: Arc<AnswerResolver>,
    settings: Arc<SettingsStore>,
    error_display: Duration,
    offline: bool,
}

impl PhaseController {
    pub fn new(resolver: Arc<AnswerResolver>, settings: Arc<SettingsStore>) -> Self {
        let error_display = resolver.params().error_display;
        Self {
            resolver,
            settings,
            error_display,
            offline: false,
        }
    }

    /// Always answer from the pool, even when a key is configured
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Submit a question.
    ///
    /// Blank questions are rejected. A submission made while another is
    /// pending supersedes it. Returns `None` if this submission was itself
    /// superseded before it resolved.
    pub async fn submit(&self, question: &str) -> Result<Option<ResolutionOutcome>, DomainError> {
        let question = Question::new(question)?;
        let config = if self.offline {
            None
        } else {
            self.settings.current_config()
        };
        debug!("Submitting question (ai={})", config.is_some());
        Ok(self.resolver.resolve(&question, config).await)
    }

    pub fn ask_again(&self) -> Result<(), DomainError> {
        self.resolver.ask_again()
    }

    /// Abandon any pending request, e.g. before shutting down
    pub fn cancel(&self) {
        self.resolver.cancel_in_flight();
    }

    pub fn phase(&self) -> Phase {
        self.resolver.phase()
    }

    pub fn answer(&self) -> Option<String> {
        self.resolver.snapshot().answer
    }

    /// The current error message, if it is still within its display time
    pub fn error_message(&self) -> Option<String> {
        let snapshot = self.resolver.snapshot();
        match (snapshot.error_message, snapshot.error_set_at) {
            (Some(message), Some(set_at)) if set_at.elapsed() < self.error_display => {
                Some(message)
            }
            _ => None,
        }
    }
}
