//! Snapshot HTTP server.
//!
//! Read-only endpoints over the latest published snapshot. Handlers never
//! fail: before the first successful cycle they serve an empty list.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::models::{EnrichedRepository, ServerConfig};
use crate::services::SnapshotStore;

/// Banner returned by `GET /`.
pub const BANNER: &str = "Open Source Globe Backend";

/// Query parameters for `GET /api/top-repos`.
#[derive(Debug, Default, Deserialize)]
pub struct TopReposParams {
    /// Case-insensitive primary language filter.
    #[serde(default)]
    pub language: Option<String>,
}

/// Response for `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub repositories: usize,
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Snapshot HTTP server.
pub struct SnapshotHttpServer {
    config: ServerConfig,
    snapshots: SnapshotStore,
}

impl SnapshotHttpServer {
    pub const fn new(snapshots: SnapshotStore, config: ServerConfig) -> Self {
        Self { config, snapshots }
    }

    /// Build the router.
    pub fn build_router(&self) -> Router {
        let app = Router::new()
            .route("/", get(banner))
            .route("/api/top-repos", get(top_repos))
            .route("/health", get(health_check))
            .with_state(self.snapshots.clone());

        if self.config.enable_cors {
            app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.config.host, self.config.port).parse()
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr()?;
        let router = self.build_router();

        tracing::info!(%addr, "snapshot HTTP server listening");

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

// Handler functions

pub async fn banner() -> &'static str {
    BANNER
}

pub async fn top_repos(
    State(snapshots): State<SnapshotStore>,
    Query(params): Query<TopReposParams>,
) -> Json<Vec<EnrichedRepository>> {
    let snapshot = snapshots.current().await;

    let repositories = match params.language.as_deref().map(str::trim) {
        Some(language) if !language.is_empty() => snapshot
            .repositories
            .iter()
            .filter(|r| r.has_language(language))
            .cloned()
            .collect(),
        _ => snapshot.repositories.clone(),
    };

    Json(repositories)
}

pub async fn health_check(State(snapshots): State<SnapshotStore>) -> Json<HealthResponse> {
    let snapshot = snapshots.current().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        repositories: snapshot.len(),
        refreshed_at: snapshot.refreshed_at,
    })
}
