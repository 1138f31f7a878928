//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces implemented by the adapters:
//! - RepositorySource: ranked repository listing
//! - ProfileSource: owner profile lookup
//! - Geocoder: free-text location search
//! - GeocodeCache: persistent location to coordinate cache

pub mod geocode_cache;
pub mod geocoder;
pub mod profile_source;
pub mod repository_source;

pub use geocode_cache::GeocodeCache;
pub use geocoder::Geocoder;
pub use profile_source::ProfileSource;
pub use repository_source::RepositorySource;
