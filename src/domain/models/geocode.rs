//! Geographic coordinate and geocode cache models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parse the string-encoded pair returned by geocoders.
    ///
    /// Returns `None` for unparseable, non-finite or out-of-range values.
    pub fn parse(lat: &str, lon: &str) -> Option<Self> {
        let lat: f64 = lat.trim().parse().ok()?;
        let lon: f64 = lon.trim().parse().ok()?;
        let coords = Self::new(lat, lon);
        coords.is_valid().then_some(coords)
    }

    /// Whether both components are finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Shift both components by the same number of degrees.
    pub fn offset(self, degrees: f64) -> Self {
        Self::new(self.lat + degrees, self.lon + degrees)
    }
}

/// A persisted location-string to coordinates mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeEntry {
    /// Free-text location exactly as the owner wrote it.
    pub location: String,
    pub coordinates: Coordinates,
    /// Time of the last write; the entry expires a fixed TTL after this.
    pub updated_at: DateTime<Utc>,
}

/// Result of writing to the geocode cache store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// A new entry was written (or an expired one replaced).
    Inserted,
    /// A live entry for the same location already exists; nothing changed.
    AlreadyExists,
}
