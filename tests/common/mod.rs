//! Common test utilities for integration tests
//!
//! Provides in-memory fakes for the ports plus fixtures shared across the
//! integration test files.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};

use repo_globe::adapters::cache::ProfileCache;
use repo_globe::domain::models::{
    Coordinates, OwnerProfile, OwnerRef, PutOutcome, RepositorySummary,
};
use repo_globe::services::{AggregationPipeline, LocationResolver, PipelineSettings, SnapshotStore};
use repo_globe::{DomainError, DomainResult, GeocodeCache, Geocoder, ProfileSource, RepositorySource};

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Profile URL used for an owner login in fixtures.
pub fn profile_url(login: &str) -> String {
    format!("https://api.github.com/users/{login}")
}

/// A ranked-list entry owned by `login`.
pub fn summary(id: u64, login: &str) -> RepositorySummary {
    RepositorySummary {
        id,
        name: format!("project-{id}"),
        full_name: format!("{login}/project-{id}"),
        description: Some(format!("Project number {id}")),
        stargazers_count: 100_000 - id,
        forks_count: 1_000,
        language: Some("Rust".to_string()),
        html_url: format!("https://github.com/{login}/project-{id}"),
        owner: OwnerRef {
            login: login.to_string(),
            avatar_url: format!("https://avatars.githubusercontent.com/{login}"),
            html_url: format!("https://github.com/{login}"),
            profile_url: profile_url(login),
        },
    }
}

/// Ranked-list fake that returns a fixed list or a fixed failure.
pub struct FakeRepositorySource {
    result: Result<Vec<RepositorySummary>, fn() -> DomainError>,
    calls: AtomicUsize,
    /// When set, `list_top` blocks until notified.
    gate: Option<Arc<Notify>>,
}

impl FakeRepositorySource {
    pub fn returning(repositories: Vec<RepositorySummary>) -> Self {
        Self {
            result: Ok(repositories),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub fn failing(err: fn() -> DomainError) -> Self {
        Self {
            result: Err(err),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepositorySource for FakeRepositorySource {
    async fn list_top(&self, _min_stars: u32, limit: u32) -> DomainResult<Vec<RepositorySummary>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.result {
            Ok(list) => Ok(list.iter().take(limit as usize).cloned().collect()),
            Err(make) => Err(make()),
        }
    }
}

/// Profile fake keyed by login with an optional per-login delay.
#[derive(Default)]
pub struct FakeProfileSource {
    locations: HashMap<String, Option<String>>,
    delays: HashMap<String, Duration>,
    failing: Vec<String>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeProfileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, login: &str, location: Option<&str>) -> Self {
        self.locations
            .insert(login.to_string(), location.map(str::to_string));
        self
    }

    pub fn with_delay(mut self, login: &str, delay: Duration) -> Self {
        self.delays.insert(login.to_string(), delay);
        self
    }

    pub fn with_failure(mut self, login: &str) -> Self {
        self.failing.push(login.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of fetches observed running at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileSource for FakeProfileSource {
    async fn fetch_profile(&self, url: &str) -> DomainResult<OwnerProfile> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
        let login = url.rsplit('/').next().unwrap_or_default().to_string();

        if let Some(delay) = self.delays.get(&login) {
            tokio::time::sleep(*delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.failing.contains(&login) {
            return Err(DomainError::UpstreamStatus {
                service: "github".to_string(),
                status: 502,
                body: "Bad Gateway".to_string(),
            });
        }

        Ok(OwnerProfile {
            location: self.locations.get(&login).cloned().flatten(),
            avatar_url: format!("https://avatars.githubusercontent.com/{login}"),
            html_url: format!("https://github.com/{login}"),
            login,
        })
    }
}

/// Geocoder fake answering from a fixed gazetteer and counting calls.
#[derive(Default)]
pub struct FakeGeocoder {
    places: HashMap<String, Coordinates>,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, query: &str, lat: f64, lon: f64) -> Self {
        self.places.insert(query.to_string(), Coordinates::new(lat, lon));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn queries(&self) -> Vec<String> {
        self.queries.lock().await.clone()
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn search(&self, query: &str) -> DomainResult<Option<Coordinates>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().await.push(query.to_string());
        Ok(self.places.get(query).copied())
    }
}

/// In-memory geocode cache with insert-if-absent semantics.
#[derive(Default)]
pub struct InMemoryGeocodeCache {
    entries: Mutex<HashMap<String, Coordinates>>,
}

impl InMemoryGeocodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn entry(&self, location: &str) -> Option<Coordinates> {
        self.entries.lock().await.get(location).copied()
    }
}

#[async_trait]
impl GeocodeCache for InMemoryGeocodeCache {
    async fn get(&self, location: &str) -> DomainResult<Option<Coordinates>> {
        Ok(self.entries.lock().await.get(location).copied())
    }

    async fn put(&self, location: &str, coordinates: Coordinates) -> DomainResult<PutOutcome> {
        let mut entries = self.entries.lock().await;
        if entries.contains_key(location) {
            return Ok(PutOutcome::AlreadyExists);
        }
        entries.insert(location.to_string(), coordinates);
        Ok(PutOutcome::Inserted)
    }
}

/// Handles to a pipeline built from fakes.
pub struct Harness {
    pub pipeline: Arc<AggregationPipeline>,
    pub repositories: Arc<FakeRepositorySource>,
    pub profiles: Arc<FakeProfileSource>,
    pub geocoder: Arc<FakeGeocoder>,
    pub cache: Arc<InMemoryGeocodeCache>,
    pub snapshots: SnapshotStore,
}

impl Harness {
    pub fn new(
        repositories: FakeRepositorySource,
        profiles: FakeProfileSource,
        geocoder: FakeGeocoder,
    ) -> Self {
        Self::with_cache(
            repositories,
            profiles,
            geocoder,
            Arc::new(InMemoryGeocodeCache::new()),
        )
    }

    pub fn with_cache(
        repositories: FakeRepositorySource,
        profiles: FakeProfileSource,
        geocoder: FakeGeocoder,
        cache: Arc<InMemoryGeocodeCache>,
    ) -> Self {
        let repositories = Arc::new(repositories);
        let profiles = Arc::new(profiles);
        let geocoder = Arc::new(geocoder);
        let snapshots = SnapshotStore::new();

        let pipeline = Arc::new(AggregationPipeline::new(
            repositories.clone(),
            profiles.clone(),
            LocationResolver::new(cache.clone(), geocoder.clone()),
            ProfileCache::new(),
            snapshots.clone(),
            PipelineSettings::default(),
        ));

        Self {
            pipeline,
            repositories,
            profiles,
            geocoder,
            cache,
            snapshots,
        }
    }
}
