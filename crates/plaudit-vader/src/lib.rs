//! VADER sentiment scoring for Plaudit.
//!
//! Wraps the [`vader_sentiment`] crate, a port of the lexicon- and rule-based
//! VADER analyser, behind [`SentimentScorer`].

use plaudit_core::{Error, Result, review::Sentiment, sentiment::SentimentScorer};
use vader_sentiment::SentimentIntensityAnalyzer;

/// Production scorer. Stateless; the lexicon is shared process-wide by the
/// underlying crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaderScorer;

impl VaderScorer {
  pub fn new() -> Self { Self }
}

impl SentimentScorer for VaderScorer {
  fn score(&self, text: &str) -> Result<Sentiment> {
    let analyzer = SentimentIntensityAnalyzer::new();
    let scores = analyzer.polarity_scores(text);
    let get = |key: &str| {
      scores
        .get(key)
        .copied()
        .ok_or_else(|| Error::Scoring(format!("analyser returned no {key:?} score")))
    };
    Ok(Sentiment {
      negative: get("neg")?,
      neutral:  get("neu")?,
      positive: get("pos")?,
      compound: get("compound")?,
    })
  }
}
