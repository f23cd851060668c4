//! The `SentimentScorer` trait.
//!
//! Implemented by scoring backends (e.g. `plaudit-vader`). The store and
//! service take a scorer by injection so tests can substitute a mock.

use std::sync::Arc;

use crate::{Result, review::Sentiment};

/// Maps review text to polarity scores.
///
/// Implementations must be deterministic: the same text always yields the
/// same [`Sentiment`]. Scoring may be CPU-costly, so callers cache results.
pub trait SentimentScorer: Send + Sync {
  fn score(&self, text: &str) -> Result<Sentiment>;
}

impl<T: SentimentScorer + ?Sized> SentimentScorer for Arc<T> {
  fn score(&self, text: &str) -> Result<Sentiment> { (**self).score(text) }
}

impl<T: SentimentScorer + ?Sized> SentimentScorer for &T {
  fn score(&self, text: &str) -> Result<Sentiment> { (**self).score(text) }
}
