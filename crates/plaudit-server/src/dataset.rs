//! Loading the startup dataset from CSV.
//!
//! The file has a header row `ReviewId,ReviewBody,Location,Timestamp`. Every
//! field is required; locations are trusted as-is.

use std::{collections::HashSet, fs::File, io::Read, path::Path};

use plaudit_core::review::{Review, ReviewId, parse_timestamp};
use serde::Deserialize;
use thiserror::Error;

/// The dataset could not be loaded. Always fatal at startup.
#[derive(Debug, Error)]
pub enum DatasetError {
  #[error("cannot open dataset: {0}")]
  Io(#[from] std::io::Error),

  #[error("malformed CSV: {0}")]
  Csv(#[from] csv::Error),

  #[error("record {record}: missing {field}")]
  MissingField { record: usize, field: &'static str },

  #[error("record {record}: bad Timestamp {value:?} (expected YYYY-MM-DD HH:MM:SS)")]
  Timestamp { record: usize, value: String },

  #[error("record {record}: duplicate ReviewId {id:?}")]
  DuplicateId { record: usize, id: String },
}

#[derive(Debug, Deserialize)]
struct RawRecord {
  #[serde(rename = "ReviewId")]
  id:        Option<String>,
  #[serde(rename = "ReviewBody")]
  body:      Option<String>,
  #[serde(rename = "Location")]
  location:  Option<String>,
  #[serde(rename = "Timestamp")]
  timestamp: Option<String>,
}

/// Read every review from the CSV file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Review>, DatasetError> {
  read(File::open(path)?)
}

/// Read every review from CSV text. Records are numbered from 1, excluding
/// the header. A `ReviewId` may appear only once.
pub fn read<R: Read>(reader: R) -> Result<Vec<Review>, DatasetError> {
  let mut csv = csv::Reader::from_reader(reader);
  let mut seen = HashSet::new();
  csv
    .deserialize::<RawRecord>()
    .enumerate()
    .map(|(i, raw)| {
      let record = i + 1;
      let review = into_review(record, raw?)?;
      if !seen.insert(review.id.clone()) {
        return Err(DatasetError::DuplicateId {
          record,
          id: review.id.as_str().to_owned(),
        });
      }
      Ok(review)
    })
    .collect()
}

fn into_review(record: usize, raw: RawRecord) -> Result<Review, DatasetError> {
  let required = |value: Option<String>, field: &'static str| {
    value
      .filter(|v| !v.is_empty())
      .ok_or(DatasetError::MissingField { record, field })
  };

  let id = required(raw.id, "ReviewId")?;
  let body = required(raw.body, "ReviewBody")?;
  let location = required(raw.location, "Location")?;
  let timestamp = required(raw.timestamp, "Timestamp")?;
  let timestamp = parse_timestamp(&timestamp)
    .map_err(|_| DatasetError::Timestamp { record, value: timestamp.clone() })?;

  Ok(Review {
    id: ReviewId::new(id),
    body,
    location,
    timestamp,
    sentiment: None,
  })
}
