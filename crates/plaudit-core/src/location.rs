//! The fixed whitelist of locations a review may be submitted for.

/// Every "City, Region" accepted by default.
pub const DEFAULT_LOCATIONS: [&str; 18] = [
  "Albuquerque, New Mexico",
  "Carlsbad, California",
  "Chula Vista, California",
  "Colorado Springs, Colorado",
  "Denver, Colorado",
  "El Cajon, California",
  "El Paso, Texas",
  "Escondido, California",
  "Fresno, California",
  "La Mesa, California",
  "Las Vegas, Nevada",
  "Los Angeles, California",
  "Oceanside, California",
  "Phoenix, Arizona",
  "Sacramento, California",
  "Salt Lake City, Utah",
  "San Diego, California",
  "Tucson, Arizona",
];

/// An ordered, immutable set of valid locations.
///
/// Membership is an exact, case-sensitive string match.
#[derive(Debug, Clone)]
pub struct LocationRegistry {
  locations: Vec<String>,
}

impl LocationRegistry {
  pub fn new<I, L>(locations: I) -> Self
  where
    I: IntoIterator<Item = L>,
    L: Into<String>,
  {
    Self { locations: locations.into_iter().map(Into::into).collect() }
  }

  pub fn is_valid(&self, location: &str) -> bool {
    self.locations.iter().any(|l| l == location)
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.locations.iter().map(String::as_str)
  }
}

impl Default for LocationRegistry {
  fn default() -> Self { Self::new(DEFAULT_LOCATIONS) }
}
