//! Persistent geocode cache port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Coordinates, PutOutcome};

/// Store of location string to coordinates, unique on the location string.
///
/// Entries expire a fixed time after their last write. Expired entries are
/// invisible to [`get`](GeocodeCache::get).
#[async_trait]
pub trait GeocodeCache: Send + Sync {
    /// Look up a live entry by exact location string.
    async fn get(&self, location: &str) -> DomainResult<Option<Coordinates>>;

    /// Store coordinates for a location.
    ///
    /// Returns [`PutOutcome::AlreadyExists`] when a live entry for the same
    /// string is already present (e.g. written by a concurrent resolution).
    async fn put(&self, location: &str, coordinates: Coordinates) -> DomainResult<PutOutcome>;
}
