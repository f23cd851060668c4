//! Server assembly for Plaudit: configuration, dataset loading and the
//! top-level router.

pub mod dataset;

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use plaudit_core::{ReviewService, sentiment::SentimentScorer};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  /// CSV file loaded before the listener is bound.
  pub dataset_path: PathBuf,
}

impl ServerConfig {
  pub const DEFAULT_HOST: &'static str = "0.0.0.0";
  pub const DEFAULT_PORT: u16 = 8000;
  pub const DEFAULT_DATASET_PATH: &'static str = "data/reviews.csv";

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router with request tracing.
pub fn app<S>(service: Arc<ReviewService<S>>) -> Router
where
  S: SentimentScorer + 'static,
{
  plaudit_api::api_router(service).layer(TraceLayer::new_for_http())
}
