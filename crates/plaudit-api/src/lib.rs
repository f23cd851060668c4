//! HTTP surface for Plaudit.
//!
//! Exposes an axum [`Router`] backed by any [`ReviewService`].
//! TLS, tracing layers and listening are the caller's responsibility.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/`  | Optional `location`, `start_date`, `end_date`; 200 + JSON array |
//! | `POST` | `/`  | Form fields `Location`, `ReviewBody`; 201 + created review |
//! | other  | `/`  | 405, including `HEAD` |

pub mod error;
pub mod reviews;

use std::sync::Arc;

use axum::{Router, routing::get};
use plaudit_core::{ReviewService, sentiment::SentimentScorer};

pub use error::ApiError;

/// Build the API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: Arc<ReviewService<S>>) -> Router<()>
where
  S: SentimentScorer + 'static,
{
  Router::new()
    .route(
      "/",
      get(reviews::list::<S>)
        .head(reviews::method_not_allowed)
        .post(reviews::submit::<S>)
        .fallback(reviews::method_not_allowed),
    )
    .with_state(service)
}
