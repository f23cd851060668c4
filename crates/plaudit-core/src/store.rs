//! [`ReviewStore`] — the in-memory, append-only review collection.

use std::{
  collections::{HashMap, HashSet},
  sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::{
  Error, Result,
  review::{Review, ReviewId, Sentiment},
  sentiment::SentimentScorer,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Ordered collection of reviews, safe to share between request handlers.
///
/// Appends are serialised by a write lock; readers get a cloned snapshot, so a
/// read sees either the old or the new length and never a partial record.
#[derive(Debug, Default)]
pub struct ReviewStore {
  inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
  reviews: Vec<Review>,
  /// Position of each review in `reviews`. Positions are stable because the
  /// store only grows.
  index:   HashMap<ReviewId, usize>,
}

impl ReviewStore {
  pub fn new() -> Self { Self::default() }

  /// Populate the store with the startup dataset.
  ///
  /// Records without a precomputed sentiment are scored eagerly. Loading is
  /// all-or-nothing: on a scoring failure or a duplicate id the store is left
  /// untouched. Returns the number of records loaded.
  pub fn load_initial<S>(
    &self,
    records: impl IntoIterator<Item = Review>,
    scorer: &S,
  ) -> Result<usize>
  where
    S: SentimentScorer + ?Sized,
  {
    let mut batch = Vec::new();
    let mut seen = HashSet::new();
    for mut review in records {
      if !seen.insert(review.id.clone()) {
        return Err(Error::DuplicateId(review.id));
      }
      if review.sentiment.is_none() {
        review.sentiment = Some(scorer.score(&review.body)?);
      }
      batch.push(review);
    }

    let mut inner = self.write();
    if let Some(dup) = batch.iter().find(|r| inner.index.contains_key(&r.id)) {
      return Err(Error::DuplicateId(dup.id.clone()));
    }
    let loaded = batch.len();
    for review in batch {
      inner.push(review);
    }
    Ok(loaded)
  }

  /// Add a review to the end of the sequence.
  ///
  /// The review is stored as given; an unscored review stays unscored until a
  /// read path calls [`Self::cache_sentiment`].
  pub fn append(&self, review: Review) -> Result<()> {
    let mut inner = self.write();
    if inner.index.contains_key(&review.id) {
      return Err(Error::DuplicateId(review.id));
    }
    inner.push(review);
    Ok(())
  }

  /// Snapshot of every review, in insertion order.
  pub fn all(&self) -> Vec<Review> { self.read().reviews.clone() }

  pub fn get(&self, id: &ReviewId) -> Option<Review> {
    let inner = self.read();
    inner.index.get(id).map(|&i| inner.reviews[i].clone())
  }

  pub fn len(&self) -> usize { self.read().reviews.len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  /// Attach `sentiment` to the review with `id` unless it already has one.
  ///
  /// Returns the sentiment now cached on the record, which is the earlier
  /// value if another reader got there first, or `None` if no such review
  /// exists.
  pub fn cache_sentiment(
    &self,
    id: &ReviewId,
    sentiment: Sentiment,
  ) -> Option<Sentiment> {
    let mut inner = self.write();
    let pos = *inner.index.get(id)?;
    let slot = &mut inner.reviews[pos].sentiment;
    Some(*slot.get_or_insert(sentiment))
  }

  // No code path panics while `Inner` is half-updated, so a poisoned lock
  // still guards consistent data.
  fn read(&self) -> RwLockReadGuard<'_, Inner> {
    self.inner.read().unwrap_or_else(PoisonError::into_inner)
  }

  fn write(&self) -> RwLockWriteGuard<'_, Inner> {
    self.inner.write().unwrap_or_else(PoisonError::into_inner)
  }
}

impl Inner {
  fn push(&mut self, review: Review) {
    self.index.insert(review.id.clone(), self.reviews.len());
    self.reviews.push(review);
  }
}
