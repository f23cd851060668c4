//! [`ReviewService`] — the two operations exposed to clients.

use crate::{
  Result, ValidationError,
  location::LocationRegistry,
  query::{self, ReviewQuery},
  review::Review,
  sentiment::SentimentScorer,
  store::ReviewStore,
};

/// Form field names, as they appear in submissions and error messages.
pub const LOCATION_FIELD: &str = "Location";
pub const BODY_FIELD: &str = "ReviewBody";

/// Ties a [`ReviewStore`] to a scorer and a location whitelist.
///
/// The service owns the store; nothing else mutates it.
#[derive(Debug)]
pub struct ReviewService<S> {
  store:     ReviewStore,
  scorer:    S,
  locations: LocationRegistry,
}

impl<S: SentimentScorer> ReviewService<S> {
  /// A service with an empty store and the default locations.
  pub fn new(scorer: S) -> Self {
    Self::with_locations(scorer, LocationRegistry::default())
  }

  pub fn with_locations(scorer: S, locations: LocationRegistry) -> Self {
    Self { store: ReviewStore::new(), scorer, locations }
  }

  /// Load the startup dataset, scoring every record eagerly.
  pub fn load_initial(
    &self,
    records: impl IntoIterator<Item = Review>,
  ) -> Result<usize> {
    self.store.load_initial(records, &self.scorer)
  }

  /// All reviews matching `query`, scored and sorted by descending compound
  /// score.
  pub fn list_reviews(&self, query: &ReviewQuery) -> Result<Vec<Review>> {
    query::run(query, &self.store, &self.scorer, &self.locations)
  }

  /// Validate and store a new review.
  ///
  /// The returned record has not been scored; its sentiment is computed the
  /// first time it is listed.
  pub fn submit_review(
    &self,
    location: Option<&str>,
    body: Option<&str>,
  ) -> Result<Review> {
    let location = location
      .filter(|l| !l.is_empty())
      .ok_or(ValidationError::Missing(LOCATION_FIELD))?;
    let body = body
      .filter(|b| !b.is_empty())
      .ok_or(ValidationError::Missing(BODY_FIELD))?;
    if !self.locations.is_valid(location) {
      return Err(ValidationError::InvalidLocation(location.to_owned()).into());
    }

    let review = Review::submitted(location, body);
    self.store.append(review.clone())?;
    Ok(review)
  }

  pub fn store(&self) -> &ReviewStore { &self.store }
}
