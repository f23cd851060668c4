//! Core types and operations for the Plaudit review store.
//!
//! This crate is deliberately free of HTTP dependencies. The API and server
//! crates depend on it; the sentiment algorithm is injected through
//! [`sentiment::SentimentScorer`].

pub mod error;
pub mod location;
pub mod query;
pub mod review;
pub mod sentiment;
pub mod service;
pub mod store;

pub use error::{Error, Result, ValidationError};
pub use service::ReviewService;
