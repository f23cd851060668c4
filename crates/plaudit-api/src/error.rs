//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

/// An error returned by an API handler. Both variants answer with a
/// plain-text body.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("internal error: {0}")]
  Internal(String),
}

impl From<plaudit_core::Error> for ApiError {
  fn from(e: plaudit_core::Error) -> Self {
    if e.is_client_error() {
      ApiError::BadRequest(e.to_string())
    } else {
      ApiError::Internal(e.to_string())
    }
  }
}

impl From<tokio::task::JoinError> for ApiError {
  fn from(e: tokio::task::JoinError) -> Self { ApiError::Internal(e.to_string()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
      ApiError::Internal(msg) => {
        tracing::error!(error = %msg, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
      }
    }
  }
}
