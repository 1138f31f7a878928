//! `serve`: scheduler plus HTTP server until Ctrl-C.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use tracing::{info, warn};

use crate::adapters::http::SnapshotHttpServer;
use crate::cli::context::{build_pipeline, open_geocode_cache};
use crate::domain::models::Config;
use crate::services::{RefreshScheduler, SnapshotStore};

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the configured listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Wait for the first cron tick instead of refreshing at startup
    #[arg(long)]
    pub skip_initial_refresh: bool,
}

pub async fn execute(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.skip_initial_refresh {
        config.schedule.run_on_start = false;
    }

    let geocode_cache = open_geocode_cache(&config).await?;
    match geocode_cache.purge_expired().await {
        Ok(purged) => info!(purged, "expired geocode entries removed"),
        Err(err) => warn!(error = %err, "failed to purge expired geocode entries"),
    }

    let snapshots = SnapshotStore::new();
    let pipeline = build_pipeline(&config, geocode_cache, snapshots.clone())?;
    let scheduler =
        RefreshScheduler::new(pipeline, &config.schedule).context("Failed to start scheduler")?;
    let ticker = scheduler.start();

    let server = SnapshotHttpServer::new(snapshots, config.server.clone());
    let served = server.serve_with_shutdown(shutdown_signal()).await;

    scheduler.stop();
    if let Err(err) = ticker.await {
        warn!(error = %err, "scheduler task ended abnormally");
    }

    served.map_err(|e| anyhow!(e)).context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
