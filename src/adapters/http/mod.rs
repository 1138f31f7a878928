//! HTTP serving adapter for the published snapshot.

pub mod snapshot_http;

pub use snapshot_http::{HealthResponse, SnapshotHttpServer, TopReposParams};
