//! Answer pool: the canned phrases the oracle falls back to.

use crate::core::error::DomainError;
use rand::Rng;

/// The phrases shipped with the book.
pub const DEFAULT_ANSWERS: &[&str] = &[
    "Yes.",
    "No.",
    "Absolutely.",
    "Never.",
    "It is certain.",
    "Without a doubt.",
    "Don't count on it.",
    "Follow your heart.",
    "Trust the process.",
    "Let it go.",
    "Not yet.",
    "The time is right.",
    "Wait and see.",
    "You already know the answer.",
    "Take the risk.",
    "Be patient.",
    "Look deeper.",
    "Trust yourself.",
    "Proceed with caution.",
    "Only if you truly want it.",
    "Yes, but not how you expect.",
    "Embrace the uncertainty.",
    "The answer is love.",
    "It's a blessing in disguise.",
    "Ask again tomorrow.",
    "Say nothing.",
    "Listen more closely.",
    "Give it time.",
    "Start over.",
    "Keep going.",
    "Let someone else decide.",
    "The signs point to yes.",
    "Do it now.",
    "Expect a surprise.",
    "It will not matter in a year.",
    "Follow the quiet voice.",
    "Leave it behind.",
    "You will not regret it.",
];

/// Immutable, non-empty sequence of distinct canned answers.
///
/// Built once at startup. An empty pool is a configuration error and is
/// rejected at construction, so a constructed pool can always pick.
/// Repeated entries collapse to their first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerPool {
    answers: Vec<String>,
}

impl AnswerPool {
    /// Build a pool from the given answers.
    pub fn new<I, S>(answers: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut distinct: Vec<String> = Vec::new();
        for answer in answers.into_iter().map(Into::into) {
            if !distinct.contains(&answer) {
                distinct.push(answer);
            }
        }
        let answers = distinct;
        if answers.is_empty() {
            return Err(DomainError::EmptyAnswerPool);
        }
        Ok(Self { answers })
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Always false for a constructed pool; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Pick a uniformly random answer, avoiding `excluding` when possible.
    pub fn pick_random(&self, excluding: Option<&str>) -> &str {
        self.pick_random_with(&mut rand::thread_rng(), excluding)
    }

    /// Same as [`pick_random`](Self::pick_random) with a caller-supplied generator.
    ///
    /// Draws among the entries that differ from `excluding`. A single-entry
    /// pool returns its entry regardless.
    pub fn pick_random_with<R: Rng + ?Sized>(&self, rng: &mut R, excluding: Option<&str>) -> &str {
        let candidates: Vec<&str> = self
            .answers
            .iter()
            .map(String::as_str)
            .filter(|answer| excluding != Some(*answer))
            .collect();
        if candidates.is_empty() {
            return &self.answers[0];
        }
        candidates[rng.gen_range(0..candidates.len())]
    }
}

impl Default for AnswerPool {
    fn default() -> Self {
        Self {
            answers: DEFAULT_ANSWERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
