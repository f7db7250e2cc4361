//! Resolve Answer use case.
//!
//! Decides between the pool and the configured provider, races the provider
//! call against a timeout, and turns every failure into a pool answer plus
//! a user-facing message.
//!
//! At most one request is in flight per resolver. Starting a new one (or
//! asking again) cancels the previous request with [`CancelReason::User`],
//! and a superseded request never touches phase or answer state.

use crate::cancellation::RequestCancellation;
use crate::config::OracleParams;
use crate::ports::oracle_client::{OracleClient, OracleError};
use crate::ports::phase_notifier::{NoPhaseNotifier, PhaseNotifier};
use boa_domain::core::string::truncate;
use boa_domain::{
    AiConfig, AnswerPool, CancelReason, DomainError, Phase, Question, ResolutionOutcome,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// User-facing fallback messages.
pub mod messages {
    pub const TIMEOUT: &str =
        "The oracle took too long to answer. Here is a random answer instead.";
    pub const CREDENTIALS_REJECTED: &str = "Your API key was not accepted. Check it in settings.";
    pub const RATE_LIMITED: &str =
        "Rate limited by the provider. Here is a random answer instead.";
    pub const UNREACHABLE: &str = "Could not reach the oracle. Here is a random answer instead.";
}

/// Pick the user-facing message for a failed provider call.
pub fn classify_error(error: &OracleError) -> String {
    match error {
        OracleError::Provider { status: 401, .. } => messages::CREDENTIALS_REJECTED.to_string(),
        OracleError::Provider { status: 429, .. } => messages::RATE_LIMITED.to_string(),
        OracleError::Provider { message, .. } => message.clone(),
        OracleError::Transport { .. } | OracleError::Cancelled => {
            messages::UNREACHABLE.to_string()
        }
    }
}

/// Read-only view of the resolver state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSnapshot {
    pub phase: Phase,
    pub answer: Option<String>,
    pub error_message: Option<String>,
    /// When the current error message was set
    pub error_set_at: Option<Instant>,
}

#[derive(Debug, Default)]
struct ResolverState {
    phase: Phase,
    answer: Option<String>,
    error_message: Option<String>,
    error_set_at: Option<Instant>,
    /// Most recently shown answer, excluded from the next pool draw
    last_answer: Option<String>,
    /// Identifies the current request; anything older is stale
    generation: u64,
    in_flight: Option<RequestCancellation>,
}

impl ResolverState {
    /// Cancel whatever is pending and invalidate it.
    fn supersede(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            debug!("Superseding in-flight oracle request");
            previous.cancel(CancelReason::User);
        }
        self.generation += 1;
    }

    fn record(&mut self, outcome: &ResolutionOutcome) {
        self.phase = Phase::Answered;
        self.answer = Some(outcome.answer.clone());
        self.last_answer = Some(outcome.answer.clone());
        self.error_set_at = outcome.error_message.as_ref().map(|_| Instant::now());
        self.error_message = outcome.error_message.clone();
    }
}

/// Use case for resolving one question into an answer.
pub struct AnswerResolver {
    client: Arc<dyn OracleClient>,
    pool: Arc<AnswerPool>,
    params: OracleParams,
    notifier: Arc<dyn PhaseNotifier>,
    state: Mutex<ResolverState>,
}

impl AnswerResolver {
    pub fn new(client: Arc<dyn OracleClient>, pool: Arc<AnswerPool>) -> Self {
        Self {
            client,
            pool,
            params: OracleParams::default(),
            notifier: Arc::new(NoPhaseNotifier),
            state: Mutex::new(ResolverState::default()),
        }
    }

    pub fn with_params(mut self, params: OracleParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn PhaseNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn params(&self) -> &OracleParams {
        &self.params
    }

    fn lock_state(&self) -> MutexGuard<'_, ResolverState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> ResolverSnapshot {
        let state = self.lock_state();
        ResolverSnapshot {
            phase: state.phase,
            answer: state.answer.clone(),
            error_message: state.error_message.clone(),
            error_set_at: state.error_set_at,
        }
    }

    pub fn phase(&self) -> Phase {
        self.lock_state().phase
    }

    /// Resolve a question.
    ///
    /// Without a config the answer is drawn from the pool immediately and no
    /// request is made. With one, the provider is asked under a timeout.
    ///
    /// Returns `None` when the request was superseded by a newer submission
    /// or an explicit "ask again"; in that case no state was changed.
    pub async fn resolve(
        &self,
        question: &Question,
        config: Option<AiConfig>,
    ) -> Option<ResolutionOutcome> {
        let Some(config) = config else {
            return Some(self.resolve_from_pool());
        };

        let (cancellation, generation) = self.begin_request();
        info!(
            "Asking {} (timeout {:?}): {}",
            config.provider(),
            self.params.timeout,
            truncate(question.content(), 80)
        );

        let result = tokio::select! {
            biased;
            _ = cancellation.cancelled() => Err(OracleError::Cancelled),
            result = self.client.fetch_answer(
                &config,
                question.content(),
                cancellation.token().clone(),
            ) => result,
            _ = tokio::time::sleep(self.params.timeout) => {
                cancellation.cancel(CancelReason::Timeout);
                Err(OracleError::Cancelled)
            }
        };

        self.finish_request(generation, &cancellation, result)
    }

    /// Leave the current answer (or pending request) and return to asking.
    ///
    /// Valid from `Contemplating` and `Answered`. Any outstanding request is
    /// cancelled first and its eventual result discarded.
    pub fn ask_again(&self) -> Result<(), DomainError> {
        {
            let mut state = self.lock_state();
            let next = state.phase.ask_again()?;
            state.supersede();
            state.phase = next;
            state.answer = None;
            state.error_message = None;
            state.error_set_at = None;
        }
        debug!("Ask again: back to asking");
        self.notifier.on_phase_change(Phase::Asking);
        Ok(())
    }

    /// Cancel any outstanding request without changing phase (e.g. on exit).
    pub fn cancel_in_flight(&self) {
        self.lock_state().supersede();
    }

    fn resolve_from_pool(&self) -> ResolutionOutcome {
        let outcome = {
            let mut state = self.lock_state();
            state.supersede();
            let answer = self.pool.pick_random(state.last_answer.as_deref());
            let outcome = ResolutionOutcome::pool(answer);
            state.record(&outcome);
            outcome
        };
        debug!("AI disabled, answered from pool");
        self.notifier.on_phase_change(Phase::Answered);
        outcome
    }

    fn begin_request(&self) -> (RequestCancellation, u64) {
        let (cancellation, generation) = {
            let mut state = self.lock_state();
            state.supersede();
            let cancellation = RequestCancellation::new();
            state.in_flight = Some(cancellation.clone());
            state.phase = Phase::on_submit(true);
            state.answer = None;
            (cancellation, state.generation)
        };
        self.notifier.on_phase_change(Phase::Contemplating);
        (cancellation, generation)
    }

    fn finish_request(
        &self,
        generation: u64,
        cancellation: &RequestCancellation,
        result: Result<String, OracleError>,
    ) -> Option<ResolutionOutcome> {
        let outcome = {
            let mut state = self.lock_state();

            // A user cancel wins over everything, including a timeout that
            // fired on the same token.
            if state.generation != generation
                || cancellation.reason() == Some(CancelReason::User)
            {
                debug!("Discarding superseded oracle result");
                return None;
            }
            state.in_flight = None;

            let last = state.last_answer.as_deref();
            let outcome = match (cancellation.reason(), result) {
                (Some(CancelReason::Timeout), _) => {
                    warn!("Oracle timed out after {:?}", self.params.timeout);
                    ResolutionOutcome::fallback(self.pool.pick_random(last), messages::TIMEOUT)
                }
                (_, Ok(answer)) if answer.is_empty() => {
                    warn!("Oracle returned no text, answering from pool");
                    ResolutionOutcome::pool(self.pool.pick_random(last))
                }
                (_, Ok(answer)) => ResolutionOutcome::oracle(answer),
                (_, Err(e)) => {
                    warn!(
                        "Oracle request failed (status {:?}): {}",
                        e.status(),
                        e
                    );
                    ResolutionOutcome::fallback(self.pool.pick_random(last), classify_error(&e))
                }
            };

            if state.phase.resolve().is_err() {
                debug!("Resolved while {}, forcing answered", state.phase);
            }
            state.record(&outcome);
            outcome
        };

        info!("Resolved answer ({:?})", outcome.source);
        self.notifier.on_phase_change(Phase::Answered);
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use boa_domain::{AnswerSource, Provider};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    // ==================== Test Mocks ====================

    /// Replies with scripted results after scripted delays, ignoring the
    /// token so the resolver's own cancellation handling is exercised.
    struct ScriptedClient {
        script: Mutex<VecDeque<(Duration, Result<String, OracleError>)>>,
        calls: AtomicUsize,
    }

    impl ScriptedClient {
        fn new(script: Vec<(Duration, Result<String, OracleError>)>) -> Self {
            Self {
                script: Mutex::new(VecDeque::from(script)),
                calls: AtomicUsize::new(0),
            }
        }

        fn replying(answer: &str) -> Self {
            Self::new(vec![(Duration::ZERO, Ok(answer.to_string()))])
        }

        fn failing(error: OracleError) -> Self {
            Self::new(vec![(Duration::ZERO, Err(error))])
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl OracleClient for ScriptedClient {
        async fn fetch_answer(
            &self,
            _config: &AiConfig,
            _question: &str,
            _cancellation: CancellationToken,
        ) -> Result<String, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let (delay, result) = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or((Duration::ZERO, Err(OracleError::Cancelled)));
            tokio::time::sleep(delay).await;
            result
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        phases: Mutex<Vec<Phase>>,
    }

    impl PhaseNotifier for RecordingNotifier {
        fn on_phase_change(&self, phase: Phase) {
            self.phases.lock().unwrap().push(phase);
        }
    }

    fn pool() -> Arc<AnswerPool> {
        Arc::new(AnswerPool::new(["Yes.", "No.", "Wait and see."]).unwrap())
    }

    fn config() -> Option<AiConfig> {
        Some(AiConfig::new(Provider::OpenAi, "sk-test"))
    }

    fn question(text: &str) -> Question {
        Question::new(text).unwrap()
    }

    fn provider_error(status: u16, message: &str) -> OracleError {
        OracleError::Provider {
            provider: Provider::OpenAi,
            status,
            message: message.to_string(),
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_no_config_draws_from_pool_without_calling_client() {
        let client = Arc::new(ScriptedClient::replying("Never."));
        let resolver = AnswerResolver::new(client.clone(), pool());

        let outcome = resolver.resolve(&question("Will it work?"), None).await.unwrap();

        assert_eq!(client.calls(), 0);
        assert_eq!(outcome.source, AnswerSource::Pool);
        assert_eq!(outcome.error_message, None);
        assert!(pool().answers().contains(&outcome.answer));
        assert_eq!(resolver.phase(), Phase::Answered);
    }

    #[tokio::test]
    async fn test_pool_answers_do_not_repeat() {
        let resolver = AnswerResolver::new(Arc::new(ScriptedClient::new(vec![])), pool());
        let mut last = None;
        for _ in 0..50 {
            let outcome = resolver.resolve(&question("Again?"), None).await.unwrap();
            assert_ne!(Some(outcome.answer.clone()), last);
            last = Some(outcome.answer);
        }
    }

    #[tokio::test]
    async fn test_success_uses_oracle_answer_exactly() {
        let client = Arc::new(ScriptedClient::replying("The stars say yes."));
        let notifier = Arc::new(RecordingNotifier::default());
        let resolver = AnswerResolver::new(client.clone(), pool()).with_notifier(notifier.clone());

        let outcome = resolver.resolve(&question("Should I?"), config()).await.unwrap();

        assert_eq!(client.calls(), 1);
        assert_eq!(outcome, ResolutionOutcome::oracle("The stars say yes."));
        let snapshot = resolver.snapshot();
        assert_eq!(snapshot.phase, Phase::Answered);
        assert_eq!(snapshot.answer.as_deref(), Some("The stars say yes."));
        assert_eq!(snapshot.error_message, None);
        assert_eq!(
            *notifier.phases.lock().unwrap(),
            vec![Phase::Contemplating, Phase::Answered]
        );
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let client = Arc::new(ScriptedClient::new(vec![
            (Duration::ZERO, Err(provider_error(500, "boom"))),
            (Duration::ZERO, Ok("Yes.".to_string())),
        ]));
        let resolver = AnswerResolver::new(client, pool());

        let first = resolver.resolve(&question("One?"), config()).await.unwrap();
        assert_eq!(first.error_message.as_deref(), Some("boom"));

        let second = resolver.resolve(&question("Two?"), config()).await.unwrap();
        assert_eq!(second.error_message, None);
        assert_eq!(resolver.snapshot().error_message, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back_with_timeout_message() {
        let client = Arc::new(ScriptedClient::new(vec![(
            Duration::from_secs(60),
            Ok("Too late.".to_string()),
        )]));
        let resolver = AnswerResolver::new(client, pool());

        let started = Instant::now();
        let outcome = resolver.resolve(&question("Hurry?"), config()).await.unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(15_000));
        assert!(elapsed < Duration::from_secs(60));
        assert_eq!(outcome.source, AnswerSource::Pool);
        assert_eq!(outcome.error_message.as_deref(), Some(messages::TIMEOUT));
        assert!(pool().answers().contains(&outcome.answer));
        assert_eq!(resolver.phase(), Phase::Answered);
    }

    #[tokio::test(start_paused = true)]
    async fn test_answer_just_before_timeout_wins() {
        let client = Arc::new(ScriptedClient::new(vec![(
            Duration::from_millis(14_999),
            Ok("Just in time.".to_string()),
        )]));
        let resolver = AnswerResolver::new(client, pool());

        let outcome = resolver.resolve(&question("Close?"), config()).await.unwrap();
        assert_eq!(outcome, ResolutionOutcome::oracle("Just in time."));
    }

    #[tokio::test]
    async fn test_custom_timeout() {
        let client = Arc::new(ScriptedClient::new(vec![(
            Duration::from_secs(5),
            Ok("Late.".to_string()),
        )]));
        let resolver = AnswerResolver::new(client, pool())
            .with_params(OracleParams::default().with_timeout(Duration::from_millis(20)));

        let outcome = resolver.resolve(&question("Quick?"), config()).await.unwrap();
        assert_eq!(outcome.error_message.as_deref(), Some(messages::TIMEOUT));
    }

    #[tokio::test]
    async fn test_401_reports_rejected_credentials() {
        let client = Arc::new(ScriptedClient::failing(provider_error(401, "Incorrect API key")));
        let resolver = AnswerResolver::new(client, pool());

        let outcome = resolver.resolve(&question("Am I in?"), config()).await.unwrap();

        assert_eq!(
            outcome.error_message.as_deref(),
            Some(messages::CREDENTIALS_REJECTED)
        );
        assert_eq!(outcome.source, AnswerSource::Pool);
        assert!(pool().answers().contains(&outcome.answer));
    }

    #[tokio::test]
    async fn test_429_reports_rate_limit() {
        let client = Arc::new(ScriptedClient::failing(provider_error(429, "Too many")));
        let resolver = AnswerResolver::new(client, pool());

        let outcome = resolver.resolve(&question("Again?"), config()).await.unwrap();

        assert_eq!(outcome.error_message.as_deref(), Some(messages::RATE_LIMITED));
        assert!(pool().answers().contains(&outcome.answer));
    }

    #[tokio::test]
    async fn test_other_provider_error_uses_provider_message() {
        let client = Arc::new(ScriptedClient::failing(provider_error(
            400,
            "model not found",
        )));
        let resolver = AnswerResolver::new(client, pool());

        let outcome = resolver.resolve(&question("Hm?"), config()).await.unwrap();
        assert_eq!(outcome.error_message.as_deref(), Some("model not found"));
    }

    #[tokio::test]
    async fn test_transport_error_reports_unreachable() {
        let client = Arc::new(ScriptedClient::failing(OracleError::Transport {
            provider: Provider::Anthropic,
            message: "connection refused".to_string(),
        }));
        let resolver = AnswerResolver::new(client, pool());

        let outcome = resolver.resolve(&question("Hello?"), config()).await.unwrap();
        assert_eq!(outcome.error_message.as_deref(), Some(messages::UNREACHABLE));
        assert_eq!(resolver.phase(), Phase::Answered);
    }

    #[tokio::test]
    async fn test_empty_oracle_answer_falls_back_silently() {
        let client = Arc::new(ScriptedClient::replying(""));
        let resolver = AnswerResolver::new(client, pool());

        let outcome = resolver.resolve(&question("Speak?"), config()).await.unwrap();
        assert_eq!(outcome.source, AnswerSource::Pool);
        assert_eq!(outcome.error_message, None);
        assert!(!outcome.answer.is_empty());
    }

    #[tokio::test]
    async fn test_second_submission_supersedes_first() {
        let client = Arc::new(ScriptedClient::new(vec![
            (Duration::from_millis(200), Ok("First.".to_string())),
            (Duration::from_millis(10), Ok("Second.".to_string())),
        ]));
        let resolver = AnswerResolver::new(client, pool());

        let pending_q = question("First?");
        let (first, second) = tokio::join!(
            resolver.resolve(&pending_q, config()),
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                resolver.resolve(&question("Second?"), config()).await
            }
        );

        assert_eq!(first, None);
        assert_eq!(second, Some(ResolutionOutcome::oracle("Second.")));
        assert_eq!(resolver.snapshot().answer.as_deref(), Some("Second."));
        assert_eq!(resolver.phase(), Phase::Answered);
    }

    #[tokio::test]
    async fn test_superseded_failure_is_silent() {
        let client = Arc::new(ScriptedClient::new(vec![
            (Duration::from_millis(100), Err(provider_error(401, "nope"))),
            (Duration::from_millis(300), Ok("Patience.".to_string())),
        ]));
        let resolver = AnswerResolver::new(client, pool());

        let pending_q = question("First?");
        let (first, second) = tokio::join!(
            resolver.resolve(&pending_q, config()),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                resolver.resolve(&question("Second?"), config()).await
            }
        );

        assert_eq!(first, None);
        assert_eq!(second.unwrap().answer, "Patience.");
        assert_eq!(resolver.snapshot().error_message, None);
    }

    #[tokio::test]
    async fn test_ask_again_while_contemplating_discards_result() {
        let client = Arc::new(ScriptedClient::new(vec![(
            Duration::from_millis(100),
            Ok("Ignored.".to_string()),
        )]));
        let notifier = Arc::new(RecordingNotifier::default());
        let resolver = AnswerResolver::new(client, pool()).with_notifier(notifier.clone());

        let pending_q = question("Pending?");
        let (outcome, ask_again) = tokio::join!(
            resolver.resolve(&pending_q, config()),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                resolver.ask_again()
            }
        );

        assert!(ask_again.is_ok());
        assert_eq!(outcome, None);
        let snapshot = resolver.snapshot();
        assert_eq!(snapshot.phase, Phase::Asking);
        assert_eq!(snapshot.answer, None);
        assert_eq!(
            *notifier.phases.lock().unwrap(),
            vec![Phase::Contemplating, Phase::Asking]
        );
    }

    #[tokio::test]
    async fn test_ask_again_from_answered_resets() {
        let resolver = AnswerResolver::new(
            Arc::new(ScriptedClient::failing(provider_error(429, "slow"))),
            pool(),
        );
        resolver.resolve(&question("Now?"), config()).await.unwrap();
        assert!(resolver.snapshot().error_message.is_some());

        resolver.ask_again().unwrap();
        let snapshot = resolver.snapshot();
        assert_eq!(snapshot.phase, Phase::Asking);
        assert_eq!(snapshot.answer, None);
        assert_eq!(snapshot.error_message, None);
    }

    #[tokio::test]
    async fn test_ask_again_from_asking_is_invalid() {
        let resolver = AnswerResolver::new(Arc::new(ScriptedClient::new(vec![])), pool());
        assert!(matches!(
            resolver.ask_again(),
            Err(DomainError::InvalidTransition {
                from: Phase::Asking,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_fallback_avoids_last_answer() {
        let pool = Arc::new(AnswerPool::new(["Yes.", "No."]).unwrap());
        let client = Arc::new(ScriptedClient::new(vec![
            (Duration::ZERO, Ok("Yes.".to_string())),
            (Duration::ZERO, Err(provider_error(500, "down"))),
        ]));
        let resolver = AnswerResolver::new(client, pool);

        resolver.resolve(&question("A?"), config()).await.unwrap();
        let fallback = resolver.resolve(&question("B?"), config()).await.unwrap();
        assert_eq!(fallback.answer, "No.");
    }

    #[test]
    fn test_classify_error() {
        assert_eq!(
            classify_error(&provider_error(401, "x")),
            messages::CREDENTIALS_REJECTED
        );
        assert_eq!(classify_error(&provider_error(429, "x")), messages::RATE_LIMITED);
        assert_eq!(classify_error(&provider_error(503, "overloaded")), "overloaded");
        assert_eq!(classify_error(&OracleError::Cancelled), messages::UNREACHABLE);
    }
}
