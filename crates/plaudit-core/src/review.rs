//! Review records — the only entity in the store.
//!
//! Reviews are never updated or deleted. The one piece of state that changes
//! after creation is the cached [`Sentiment`], which is attached at most once.

use std::fmt;

use chrono::{Local, NaiveDateTime, Timelike as _};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed textual form of [`Review::timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque review identifier.
///
/// Seeded reviews carry whatever id the dataset provides; reviews submitted
/// through the API get a fresh UUIDv4.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(String);

impl ReviewId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn generate() -> Self { Self(Uuid::new_v4().to_string()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ReviewId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Sentiment ───────────────────────────────────────────────────────────────

/// Polarity scores for a piece of text.
///
/// `negative`, `neutral` and `positive` are proportions of the text; `compound`
/// is the normalised aggregate in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
  #[serde(rename = "neg")]
  pub negative: f64,
  #[serde(rename = "neu")]
  pub neutral:  f64,
  #[serde(rename = "pos")]
  pub positive: f64,
  pub compound: f64,
}

// ─── Review ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
  #[serde(rename = "ReviewId")]
  pub id:        ReviewId,
  #[serde(rename = "ReviewBody")]
  pub body:      String,
  #[serde(rename = "Location")]
  pub location:  String,
  #[serde(rename = "Timestamp", with = "timestamp")]
  pub timestamp: NaiveDateTime,
  /// Absent until the review is first scored.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sentiment: Option<Sentiment>,
}

impl Review {
  /// A freshly submitted, not yet scored review stamped with the current
  /// local time (whole seconds).
  pub fn submitted(location: impl Into<String>, body: impl Into<String>) -> Self {
    let now = Local::now().naive_local();
    Self {
      id:        ReviewId::generate(),
      body:      body.into(),
      location:  location.into(),
      timestamp: now.with_nanosecond(0).unwrap_or(now),
      sentiment: None,
    }
  }

  /// Compound score, or `None` if the review has not been scored yet.
  pub fn compound(&self) -> Option<f64> {
    self.sentiment.map(|s| s.compound)
  }
}

/// Parse a timestamp in [`TIMESTAMP_FORMAT`].
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
  NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
}

mod timestamp {
  use chrono::NaiveDateTime;
  use serde::{Deserialize as _, Deserializer, Serializer, de::Error as _};

  use super::TIMESTAMP_FORMAT;

  pub fn serialize<S: Serializer>(
    ts: &NaiveDateTime,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<NaiveDateTime, D::Error> {
    let s = String::deserialize(deserializer)?;
    super::parse_timestamp(&s).map_err(D::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Timelike;
  use serde_json::json;

  fn sample() -> Review {
    Review {
      id:        ReviewId::new("r-1"),
      body:      "Great tacos".into(),
      location:  "Tucson, Arizona".into(),
      timestamp: parse_timestamp("2023-04-05 13:07:09").unwrap(),
      sentiment: None,
    }
  }

  #[test]
  fn unscored_review_omits_sentiment_key() {
    let value = serde_json::to_value(sample()).unwrap();
    assert_eq!(
      value,
      json!({
        "ReviewId": "r-1",
        "ReviewBody": "Great tacos",
        "Location": "Tucson, Arizona",
        "Timestamp": "2023-04-05 13:07:09",
      })
    );
  }

  #[test]
  fn scored_review_uses_short_sentiment_keys() {
    let mut review = sample();
    review.sentiment = Some(Sentiment {
      negative: 0.0,
      neutral:  0.25,
      positive: 0.75,
      compound: 0.6249,
    });
    let value = serde_json::to_value(&review).unwrap();
    assert_eq!(
      value["sentiment"],
      json!({ "neg": 0.0, "neu": 0.25, "pos": 0.75, "compound": 0.6249 })
    );
  }

  #[test]
  fn rejects_timestamp_in_other_format() {
    let raw = json!({
      "ReviewId": "r-1",
      "ReviewBody": "ok",
      "Location": "Tucson, Arizona",
      "Timestamp": "2023-04-05T13:07:09",
    });
    assert!(serde_json::from_value::<Review>(raw).is_err());
  }

  #[test]
  fn submitted_review_has_fresh_id_and_whole_second_timestamp() {
    let a = Review::submitted("Denver, Colorado", "fine");
    let b = Review::submitted("Denver, Colorado", "fine");
    assert_ne!(a.id, b.id);
    assert_eq!(a.timestamp.nanosecond(), 0);
    assert!(a.sentiment.is_none());
  }
}
