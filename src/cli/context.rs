//! Wiring of adapters and services from a loaded [`Config`].

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::adapters::cache::ProfileCache;
use crate::adapters::github::GitHubClient;
use crate::adapters::nominatim::NominatimClient;
use crate::adapters::sqlite::{initialize_database, SqliteGeocodeCache};
use crate::domain::models::Config;
use crate::services::{AggregationPipeline, LocationResolver, PipelineSettings, SnapshotStore};

/// Open the geocode cache database, applying migrations.
pub async fn open_geocode_cache(config: &Config) -> Result<Arc<SqliteGeocodeCache>> {
    let pool = initialize_database(&config.database)
        .await
        .with_context(|| format!("Failed to open geocode cache at {}", config.database.path))?;

    let ttl = chrono::Duration::days(i64::from(config.database.geocode_ttl_days));
    Ok(Arc::new(SqliteGeocodeCache::with_ttl(pool, ttl)))
}

/// Build a pipeline publishing into `snapshots`.
pub fn build_pipeline(
    config: &Config,
    geocode_cache: Arc<SqliteGeocodeCache>,
    snapshots: SnapshotStore,
) -> Result<Arc<AggregationPipeline>> {
    let github = Arc::new(
        GitHubClient::new(&config.github, config.retry.clone())
            .context("Failed to build GitHub client")?,
    );
    if !github.has_token() {
        tracing::warn!("no GitHub token configured; refresh cycles will be skipped");
    }

    let geocoder = Arc::new(
        NominatimClient::new(&config.geocoder).context("Failed to build geocoder client")?,
    );

    Ok(Arc::new(AggregationPipeline::new(
        github.clone(),
        github,
        LocationResolver::new(geocode_cache, geocoder),
        ProfileCache::from_config(&config.pipeline),
        snapshots,
        PipelineSettings::from_config(config),
    )))
}
