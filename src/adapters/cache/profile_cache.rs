//! Owner profile cache backed by a moka TTL cache.
//!
//! Entries live for a fixed TTL from write time (default one hour), which
//! spans consecutive hourly refresh cycles only when the profile was fetched
//! late in the previous one.

use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::errors::DomainError;
use crate::domain::models::{OwnerProfile, PipelineConfig};

/// Default TTL for cached owner profiles.
pub const PROFILE_CACHE_TTL_SECS: u64 = 3600;

/// Default maximum number of cached profiles.
pub const PROFILE_CACHE_MAX_CAPACITY: u64 = 10_000;

/// In-memory profile cache keyed by profile URL.
///
/// Cloning is cheap and clones share the same storage.
#[derive(Clone)]
pub struct ProfileCache {
    by_url: Cache<String, OwnerProfile>,
}

impl ProfileCache {
    /// Create a cache with the default TTL and capacity.
    pub fn new() -> Self {
        Self::with_ttl(
            Duration::from_secs(PROFILE_CACHE_TTL_SECS),
            PROFILE_CACHE_MAX_CAPACITY,
        )
    }

    /// Create with custom TTL and capacity.
    pub fn with_ttl(ttl: Duration, max_capacity: u64) -> Self {
        let by_url = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self { by_url }
    }

    /// Create from pipeline configuration.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::with_ttl(
            Duration::from_secs(config.profile_cache_ttl_secs),
            config.profile_cache_capacity,
        )
    }

    pub async fn get(&self, url: &str) -> Option<OwnerProfile> {
        self.by_url.get(url).await
    }

    pub async fn put(&self, url: &str, profile: OwnerProfile) {
        self.by_url.insert(url.to_string(), profile).await;
    }

    /// Return the cached profile or run `fetch` to populate it.
    ///
    /// Concurrent callers missing on the same URL share a single `fetch`.
    /// Failures are returned to every waiter and are not cached.
    pub async fn get_or_fetch<F>(&self, url: &str, fetch: F) -> Result<OwnerProfile, Arc<DomainError>>
    where
        F: Future<Output = Result<OwnerProfile, DomainError>>,
    {
        self.by_url.try_get_with(url.to_string(), fetch).await
    }
}

impl Default for ProfileCache {
    fn default() -> Self {
        Self::new()
    }
}
