//! Handlers for `/`.
//!
//! Query strings and form bodies are decoded as ordered key/value pairs. When
//! a key repeats, its first non-empty value wins; empty values count as
//! absent.

use std::sync::Arc;

use axum::{
  Form, Json,
  extract::{
    Query, State,
    rejection::{FormRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use plaudit_core::{
  ReviewService, query::ReviewQuery, review::Review, sentiment::SentimentScorer,
};

use crate::error::ApiError;

/// Url-encoded pairs in request order.
type Pairs = Vec<(String, String)>;

fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
  pairs
    .iter()
    .find(|(k, v)| k == key && !v.is_empty())
    .map(|(_, v)| v.clone())
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ListParams {
  /// Exact-match location; ignored if it is not a registered location.
  pub location:   Option<String>,
  /// `YYYY-MM-DD`, inclusive from midnight.
  pub start_date: Option<String>,
  /// `YYYY-MM-DD`, inclusive up to midnight.
  pub end_date:   Option<String>,
}

impl ListParams {
  pub fn from_pairs(pairs: &[(String, String)]) -> Self {
    Self {
      location:   first_value(pairs, "location"),
      start_date: first_value(pairs, "start_date"),
      end_date:   first_value(pairs, "end_date"),
    }
  }
}

/// `GET /[?location=...][&start_date=...][&end_date=...]`
///
/// Scoring reviews that have not been read before is CPU-bound, so the query
/// runs on the blocking pool.
pub async fn list<S>(
  State(service): State<Arc<ReviewService<S>>>,
  pairs: Result<Query<Pairs>, QueryRejection>,
) -> Result<Json<Vec<Review>>, ApiError>
where
  S: SentimentScorer + 'static,
{
  let Query(pairs) = pairs.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let params = ListParams::from_pairs(&pairs);
  let query = ReviewQuery::parse(
    params.location.as_deref(),
    params.start_date.as_deref(),
    params.end_date.as_deref(),
  )?;

  let reviews =
    tokio::task::spawn_blocking(move || service.list_reviews(&query)).await??;
  Ok(Json(reviews))
}

// ─── Submit ───────────────────────────────────────────────────────────────────

/// Fields accepted by `POST /`.
#[derive(Debug, Default)]
pub struct SubmitForm {
  pub location:    Option<String>,
  pub review_body: Option<String>,
}

impl SubmitForm {
  pub fn from_pairs(pairs: &[(String, String)]) -> Self {
    Self {
      location:    first_value(pairs, "Location"),
      review_body: first_value(pairs, "ReviewBody"),
    }
  }
}

/// `POST /` — returns 201 + the stored, not yet scored, review.
pub async fn submit<S>(
  State(service): State<Arc<ReviewService<S>>>,
  pairs: Result<Form<Pairs>, FormRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SentimentScorer + 'static,
{
  let Form(pairs) = pairs.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let form = SubmitForm::from_pairs(&pairs);
  let review = service
    .submit_review(form.location.as_deref(), form.review_body.as_deref())
    .inspect_err(|e| tracing::debug!(error = %e, "review rejected"))?;

  tracing::info!(id = %review.id, location = %review.location, "review submitted");
  Ok((StatusCode::CREATED, Json(review)))
}

// ─── Fallback ─────────────────────────────────────────────────────────────────

pub async fn method_not_allowed() -> impl IntoResponse {
  (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn pairs(raw: &[(&str, &str)]) -> Pairs {
    raw.iter().map(|&(k, v)| (k.to_owned(), v.to_owned())).collect()
  }

  #[test]
  fn first_non_empty_value_wins() {
    let p = pairs(&[("location", ""), ("location", "a"), ("location", "b")]);
    assert_eq!(ListParams::from_pairs(&p).location.as_deref(), Some("a"));
  }

  #[test]
  fn keys_are_case_sensitive() {
    let p = pairs(&[("location", "x"), ("ReviewBody", "y")]);
    let form = SubmitForm::from_pairs(&p);
    assert!(form.location.is_none());
    assert_eq!(form.review_body.as_deref(), Some("y"));
  }
}
