pub mod config;
pub mod geocode;
pub mod profile;
pub mod repository;
pub mod snapshot;

pub use config::{
    Config, DatabaseConfig, GeocoderConfig, GitHubConfig, LoggingConfig, PipelineConfig,
    RetryConfig, ScheduleConfig, ServerConfig,
};
pub use geocode::{Coordinates, GeocodeEntry, PutOutcome};
pub use profile::OwnerProfile;
pub use repository::{EnrichedOwner, EnrichedRepository, OwnerRef, RepositorySummary};
pub use snapshot::Snapshot;
