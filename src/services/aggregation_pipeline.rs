//! Aggregation pipeline: one refresh cycle from ranked list to snapshot.
//!
//! A cycle lists the top repositories, resolves each owner's profile and
//! location in a bounded fan-out, drops entries without coordinates, spreads
//! overlapping markers and publishes the result. Only a ranked-list failure
//! is fatal to a cycle; per-repository failures degrade to "no location".

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{error, info, info_span, warn, Instrument};

use crate::adapters::cache::ProfileCache;
use crate::domain::errors::DomainError;
use crate::domain::models::{Config, EnrichedRepository, OwnerProfile, OwnerRef, RepositorySummary};
use crate::domain::ports::{ProfileSource, RepositorySource};
use crate::services::location_resolver::LocationResolver;
use crate::services::overlap::spread_overlapping;
use crate::services::snapshot_store::SnapshotStore;

/// Result of a single [`AggregationPipeline::run_cycle`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// A new snapshot was published.
    Published {
        /// Repositories returned by the ranked list.
        total: usize,
        /// Entries in the published snapshot.
        published: usize,
        /// Entries dropped for lack of coordinates.
        dropped: usize,
    },
    /// Another cycle was already running on this pipeline.
    Skipped,
    /// The ranked-list gateway has no credential configured.
    Misconfigured,
    /// The ranked list could not be fetched; the previous snapshot is kept.
    Aborted,
}

impl RefreshOutcome {
    pub const fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Tuning knobs for a cycle.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub min_stars: u32,
    pub top_n: u32,
    pub max_concurrency: usize,
    pub offset_step_degrees: f64,
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_stars: config.github.min_stars,
            top_n: config.github.top_n,
            max_concurrency: config.pipeline.max_concurrency,
            offset_step_degrees: config.pipeline.offset_step_degrees,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Clears the running flag when the cycle ends, including on panic.
struct RunningGuard<'a>(&'a AtomicBool);

impl<'a> RunningGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct AggregationPipeline {
    repositories: Arc<dyn RepositorySource>,
    profiles: Arc<dyn ProfileSource>,
    resolver: LocationResolver,
    profile_cache: ProfileCache,
    snapshots: SnapshotStore,
    settings: PipelineSettings,
    running: AtomicBool,
}

impl AggregationPipeline {
    pub fn new(
        repositories: Arc<dyn RepositorySource>,
        profiles: Arc<dyn ProfileSource>,
        resolver: LocationResolver,
        profile_cache: ProfileCache,
        snapshots: SnapshotStore,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            repositories,
            profiles,
            resolver,
            profile_cache,
            snapshots,
            settings,
            running: AtomicBool::new(false),
        }
    }

    /// Store the pipeline publishes into.
    pub const fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Run one refresh cycle. Never fails; the outcome says what happened.
    pub async fn run_cycle(&self) -> RefreshOutcome {
        let Some(_guard) = RunningGuard::acquire(&self.running) else {
            info!("refresh cycle already in progress, skipping");
            return RefreshOutcome::Skipped;
        };

        self.execute_cycle()
            .instrument(info_span!(
                "refresh_cycle",
                top_n = self.settings.top_n,
                min_stars = self.settings.min_stars
            ))
            .await
    }

    async fn execute_cycle(&self) -> RefreshOutcome {
        let started = Instant::now();
        info!("refresh cycle started");

        let listed = match self
            .repositories
            .list_top(self.settings.min_stars, self.settings.top_n)
            .await
        {
            Ok(listed) => listed,
            Err(DomainError::MissingCredential(detail)) => {
                error!(%detail, "ranked list credential missing, skipping cycle");
                return RefreshOutcome::Misconfigured;
            }
            Err(err) => {
                error!(error = %err, "failed to fetch ranked list, keeping previous snapshot");
                return RefreshOutcome::Aborted;
            }
        };

        let total = listed.len();
        let mut slots: Vec<Option<EnrichedRepository>> = (0..total).map(|_| None).collect();

        let mut enriched = stream::iter(listed.into_iter().enumerate())
            .map(|(index, summary)| async move { (index, self.enrich(summary).await) })
            .buffer_unordered(self.settings.max_concurrency.max(1));

        while let Some((index, repository)) = enriched.next().await {
            slots[index] = Some(repository);
        }

        let resolved = spread_overlapping(
            slots.into_iter().flatten().collect(),
            self.settings.offset_step_degrees,
        );
        let published = resolved.len();
        let dropped = total - published;

        self.snapshots.publish(resolved).await;

        info!(
            total,
            published,
            dropped,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "snapshot published"
        );

        RefreshOutcome::Published {
            total,
            published,
            dropped,
        }
    }

    async fn enrich(&self, summary: RepositorySummary) -> EnrichedRepository {
        let profile = self.owner_profile(&summary.owner).await;
        let location = self.resolver.resolve(profile.location()).await;
        EnrichedRepository::from_summary(summary, location)
    }

    async fn owner_profile(&self, owner: &OwnerRef) -> OwnerProfile {
        let fetch = self.profiles.fetch_profile(&owner.profile_url);
        match self.profile_cache.get_or_fetch(&owner.profile_url, fetch).await {
            Ok(profile) => profile,
            Err(err) => {
                warn!(login = %owner.login, error = %err, "failed to fetch owner profile");
                OwnerProfile::without_location(owner.login.as_str())
            }
        }
    }
}
