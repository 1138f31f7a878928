//! In-memory caching layer.
//!
//! Uses `moka` for TTL-based concurrent caching of owner profiles, keyed by
//! profile URL. Lost on restart; never the source of truth.

pub mod profile_cache;

pub use profile_cache::ProfileCache;
