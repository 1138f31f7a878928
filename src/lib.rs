//! repo-globe - top GitHub repositories placed on a globe
//!
//! Periodically lists the most-starred public repositories, resolves each
//! owner's free-text profile location to coordinates, and serves the result
//! as a JSON snapshot for a globe front end.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors and port traits
//! - **Adapters** (`adapters`): GitHub, Nominatim, SQLite, in-memory cache, HTTP
//! - **Service Layer** (`services`): Location resolution, the refresh pipeline, scheduling
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use repo_globe::infrastructure::config::ConfigLoader;
//! use repo_globe::services::SnapshotStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let cache = repo_globe::cli::context::open_geocode_cache(&config).await?;
//!     let snapshots = SnapshotStore::new();
//!     let pipeline = repo_globe::cli::context::build_pipeline(&config, cache, snapshots.clone())?;
//!     println!("{:?}", pipeline.run_cycle().await);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, Coordinates, EnrichedRepository, OwnerProfile, RepositorySummary, Snapshot,
};
pub use domain::ports::{GeocodeCache, Geocoder, ProfileSource, RepositorySource};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{AggregationPipeline, LocationResolver, RefreshOutcome, SnapshotStore};
