//! Filtering and ordering of review snapshots.
//!
//! A [`ReviewQuery`] is parsed from raw request parameters, applied to a
//! snapshot from [`ReviewStore::all`], and the surviving reviews are scored
//! (lazily, through the store's cache) and sorted by descending compound
//! score.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
  Error, Result,
  location::LocationRegistry,
  review::Review,
  sentiment::SentimentScorer,
  store::ReviewStore,
};

/// Date format accepted by the `start_date` and `end_date` filters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parsed filter criteria. All filters are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewQuery {
  /// Exact-match location. Ignored unless it is a registered location.
  pub location: Option<String>,
  /// Inclusive lower bound on `timestamp`.
  pub start:    Option<NaiveDateTime>,
  /// Inclusive upper bound on `timestamp`. Dates are taken at midnight, so
  /// later reviews on the same day are excluded.
  pub end:      Option<NaiveDateTime>,
}

impl ReviewQuery {
  /// Build a query from raw parameter values. Empty strings count as absent.
  pub fn parse(
    location: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
  ) -> Result<Self> {
    Ok(Self {
      location: non_empty(location).map(str::to_owned),
      start:    non_empty(start_date)
        .map(|v| parse_date("start_date", v))
        .transpose()?,
      end:      non_empty(end_date)
        .map(|v| parse_date("end_date", v))
        .transpose()?,
    })
  }

  /// Whether `review` passes every filter in this query.
  pub fn matches(&self, review: &Review, locations: &LocationRegistry) -> bool {
    if let Some(location) = &self.location
      && locations.is_valid(location)
      && review.location != *location
    {
      return false;
    }
    if self.start.is_some_and(|start| review.timestamp < start) {
      return false;
    }
    if self.end.is_some_and(|end| review.timestamp > end) {
      return false;
    }
    true
  }

  /// Keep the reviews that match, preserving their order.
  pub fn filter(
    &self,
    reviews: Vec<Review>,
    locations: &LocationRegistry,
  ) -> Vec<Review> {
    reviews
      .into_iter()
      .filter(|r| self.matches(r, locations))
      .collect()
  }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
  value.filter(|v| !v.is_empty())
}

fn parse_date(name: &'static str, value: &str) -> Result<NaiveDateTime> {
  NaiveDate::parse_from_str(value, DATE_FORMAT)
    .map(|d| d.and_time(chrono::NaiveTime::MIN))
    .map_err(|_| Error::InvalidParameter { name, value: value.to_owned() })
}

// ─── Scoring and ordering ────────────────────────────────────────────────────

/// Make sure every review in `reviews` carries a sentiment.
///
/// Unscored reviews are scored outside the store lock and the result is
/// cached on the stored record; the value actually cached (which may come from
/// a concurrent reader) is copied back into `reviews`.
pub fn ensure_scored<S>(
  reviews: &mut [Review],
  store: &ReviewStore,
  scorer: &S,
) -> Result<usize>
where
  S: SentimentScorer + ?Sized,
{
  let mut scored = 0;
  for review in reviews.iter_mut().filter(|r| r.sentiment.is_none()) {
    let fresh = scorer.score(&review.body)?;
    let cached = store.cache_sentiment(&review.id, fresh);
    review.sentiment = Some(cached.unwrap_or(fresh));
    scored += 1;
  }
  if scored > 0 {
    tracing::debug!(scored, "scored reviews on read");
  }
  Ok(scored)
}

/// Stable sort by descending compound score. Unscored reviews sort last.
///
/// `-0.0` and `0.0` compare equal, so neutral reviews keep their input order
/// whatever the sign of their zero.
pub fn sort_by_compound_descending(reviews: &mut [Review]) {
  // Adding `0.0` folds `-0.0` into `0.0` before the total order is applied.
  let key = |r: &Review| r.compound().map_or(f64::NEG_INFINITY, |c| c + 0.0);
  reviews.sort_by(|a, b| key(b).total_cmp(&key(a)));
}

/// Run `query` against the current contents of `store`.
pub fn run<S>(
  query: &ReviewQuery,
  store: &ReviewStore,
  scorer: &S,
  locations: &LocationRegistry,
) -> Result<Vec<Review>>
where
  S: SentimentScorer + ?Sized,
{
  let mut reviews = query.filter(store.all(), locations);
  ensure_scored(&mut reviews, store, scorer)?;
  sort_by_compound_descending(&mut reviews);
  Ok(reviews)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::review::{ReviewId, Sentiment, parse_timestamp};

  fn review(id: &str, location: &str, ts: &str, compound: Option<f64>) -> Review {
    Review {
      id:        ReviewId::new(id),
      body:      format!("review {id}"),
      location:  location.into(),
      timestamp: parse_timestamp(ts).unwrap(),
      sentiment: compound.map(|compound| Sentiment {
        negative: 0.0,
        neutral:  1.0,
        positive: 0.0,
        compound,
      }),
    }
  }

  fn ids(reviews: &[Review]) -> Vec<&str> {
    reviews.iter().map(|r| r.id.as_str()).collect()
  }

  fn sample() -> Vec<Review> {
    vec![
      review("a", "Denver, Colorado", "2023-01-10 09:00:00", Some(0.5)),
      review("b", "Denver, Colorado", "2023-01-11 00:00:00", Some(0.8)),
      review("c", "Phoenix, Arizona", "2023-01-12 18:30:00", Some(0.2)),
    ]
  }

  // ── Parsing ─────────────────────────────────────────────────────────────

  #[test]
  fn parse_treats_empty_values_as_absent() {
    let q = ReviewQuery::parse(Some(""), Some(""), Some("")).unwrap();
    assert_eq!(q, ReviewQuery::default());
  }

  #[test]
  fn parse_dates_at_midnight() {
    let q = ReviewQuery::parse(None, Some("2023-01-11"), Some("2023-01-12")).unwrap();
    assert_eq!(q.start, Some(parse_timestamp("2023-01-11 00:00:00").unwrap()));
    assert_eq!(q.end, Some(parse_timestamp("2023-01-12 00:00:00").unwrap()));
  }

  #[test]
  fn parse_rejects_malformed_dates() {
    for bad in ["2023/01/11", "11-01-2023", "2023-13-01", "2023-01-11 00:00:00", "yesterday"] {
      let err = ReviewQuery::parse(None, Some(bad), None).unwrap_err();
      assert!(
        matches!(err, Error::InvalidParameter { name: "start_date", .. }),
        "{bad}: {err}"
      );
    }
    let err = ReviewQuery::parse(None, None, Some("nope")).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { name: "end_date", .. }));
  }

  // ── Filtering ───────────────────────────────────────────────────────────

  #[test]
  fn location_filter_is_exact() {
    let registry = LocationRegistry::default();
    let q = ReviewQuery { location: Some("Denver, Colorado".into()), ..Default::default() };
    assert_eq!(ids(&q.filter(sample(), &registry)), ["a", "b"]);
  }

  #[test]
  fn unregistered_location_filter_is_ignored() {
    let registry = LocationRegistry::default();
    let q = ReviewQuery { location: Some("Nowhere".into()), ..Default::default() };
    assert_eq!(ids(&q.filter(sample(), &registry)), ["a", "b", "c"]);
  }

  #[test]
  fn date_bounds_are_inclusive_at_midnight() {
    let registry = LocationRegistry::default();
    let q = ReviewQuery::parse(None, Some("2023-01-11"), None).unwrap();
    assert_eq!(ids(&q.filter(sample(), &registry)), ["b", "c"]);

    // b sits exactly on the end bound; c is later the same day as its bound.
    let q = ReviewQuery::parse(None, None, Some("2023-01-11")).unwrap();
    assert_eq!(ids(&q.filter(sample(), &registry)), ["a", "b"]);
    let q = ReviewQuery::parse(None, None, Some("2023-01-12")).unwrap();
    assert_eq!(ids(&q.filter(sample(), &registry)), ["a", "b"]);
  }

  #[test]
  fn filters_combine_with_and() {
    let registry = LocationRegistry::default();
    let q = ReviewQuery::parse(Some("Denver, Colorado"), Some("2023-01-11"), Some("2023-01-31"))
      .unwrap();
    assert_eq!(ids(&q.filter(sample(), &registry)), ["b"]);
  }

  // ── Ordering ────────────────────────────────────────────────────────────

  #[test]
  fn sorts_descending_by_compound() {
    let mut reviews = sample();
    sort_by_compound_descending(&mut reviews);
    assert_eq!(ids(&reviews), ["b", "a", "c"]);
  }

  #[test]
  fn sort_is_stable_on_ties() {
    let mut reviews = vec![
      review("n1", "Denver, Colorado", "2023-01-01 00:00:00", Some(0.0)),
      review("p", "Denver, Colorado", "2023-01-01 00:00:00", Some(0.4)),
      review("n2", "Denver, Colorado", "2023-01-01 00:00:00", Some(0.0)),
      review("n3", "Denver, Colorado", "2023-01-01 00:00:00", Some(0.0)),
      review("neg", "Denver, Colorado", "2023-01-01 00:00:00", Some(-0.3)),
    ];
    sort_by_compound_descending(&mut reviews);
    assert_eq!(ids(&reviews), ["p", "n1", "n2", "n3", "neg"]);
  }

  #[test]
  fn signed_zeros_tie() {
    let mut reviews = vec![
      review("neg0", "Denver, Colorado", "2023-01-01 00:00:00", Some(-0.0)),
      review("pos0", "Denver, Colorado", "2023-01-01 00:00:00", Some(0.0)),
      review("neg0b", "Denver, Colorado", "2023-01-01 00:00:00", Some(-0.0)),
      review("low", "Denver, Colorado", "2023-01-01 00:00:00", Some(-0.1)),
    ];
    sort_by_compound_descending(&mut reviews);
    assert_eq!(ids(&reviews), ["neg0", "pos0", "neg0b", "low"]);
  }
}
