//! Error types for `plaudit-core`.

use thiserror::Error;

use crate::review::ReviewId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  Validation(#[from] ValidationError),

  #[error("invalid {name}: {value:?} (expected YYYY-MM-DD)")]
  InvalidParameter { name: &'static str, value: String },

  #[error("duplicate review id: {0}")]
  DuplicateId(ReviewId),

  #[error("sentiment scoring failed: {0}")]
  Scoring(String),
}

impl Error {
  /// `true` for errors caused by the caller's input rather than by the
  /// service itself.
  pub fn is_client_error(&self) -> bool {
    matches!(self, Self::Validation(_) | Self::InvalidParameter { .. })
  }
}

/// A rejected review submission, naming the offending form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("missing {0}")]
  Missing(&'static str),

  #[error("invalid Location: {0:?}")]
  InvalidLocation(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
