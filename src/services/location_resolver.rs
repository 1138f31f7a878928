//! Location resolver: free-text owner location to coordinates.
//!
//! Consults the persistent geocode cache first and the geocoder gateway on a
//! miss, writing new results back so each distinct string is geocoded at
//! most once per cache lifetime. Every downstream failure is logged and
//! degrades to `None`; nothing is propagated to the caller.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::models::{Coordinates, PutOutcome};
use crate::domain::ports::{GeocodeCache, Geocoder};

pub struct LocationResolver {
    cache: Arc<dyn GeocodeCache>,
    geocoder: Arc<dyn Geocoder>,
}

impl LocationResolver {
    pub fn new(cache: Arc<dyn GeocodeCache>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { cache, geocoder }
    }

    /// Resolve a location string, or `None` if absent or unresolvable.
    pub async fn resolve(&self, location: Option<&str>) -> Option<Coordinates> {
        let location = location.filter(|l| !l.trim().is_empty())?;

        match self.cache.get(location).await {
            Ok(Some(coords)) => {
                debug!(location, "geocode cache hit");
                return Some(coords);
            }
            Ok(None) => {}
            Err(err) => warn!(location, error = %err, "geocode cache read failed, treating as miss"),
        }

        let coords = match self.geocoder.search(location).await {
            Ok(Some(coords)) => coords,
            Ok(None) => {
                warn!(location, "no geocoding result");
                return None;
            }
            Err(err) => {
                error!(location, error = %err, "geocoding failed");
                return None;
            }
        };

        match self.cache.put(location, coords).await {
            Ok(PutOutcome::Inserted) => debug!(location, "geocode cached"),
            Ok(PutOutcome::AlreadyExists) => {
                debug!(location, "geocode already cached by a concurrent resolution");
            }
            Err(err) => warn!(location, error = %err, "failed to persist geocode"),
        }

        Some(coords)
    }
}
