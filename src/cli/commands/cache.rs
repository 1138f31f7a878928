//! `cache`: geocode cache maintenance.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::context::open_geocode_cache;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Args, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommands,
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show live and expired geocode entry counts
    Stats,
    /// Delete expired geocode entries
    Purge,
}

#[derive(Debug, Serialize)]
pub struct CacheStatsOutput {
    pub path: String,
    pub ttl_days: u32,
    pub live: u64,
    pub expired: u64,
}

impl CommandOutput for CacheStatsOutput {
    fn to_human(&self) -> String {
        format!(
            "Geocode cache: {}\n  live entries:    {}\n  expired entries: {}\n  ttl:             {} days",
            self.path, self.live, self.expired, self.ttl_days
        )
    }
}

#[derive(Debug, Serialize)]
pub struct CachePurgeOutput {
    pub removed: u64,
}

impl CommandOutput for CachePurgeOutput {
    fn to_human(&self) -> String {
        match self.removed {
            0 => "No expired geocode entries.".to_string(),
            1 => "Removed 1 expired geocode entry.".to_string(),
            n => format!("Removed {n} expired geocode entries."),
        }
    }
}

pub async fn execute(args: CacheArgs, config: Config, json_mode: bool) -> Result<()> {
    let cache = open_geocode_cache(&config).await?;

    match args.command {
        CacheCommands::Stats => {
            let stats = cache.stats().await?;
            output(
                &CacheStatsOutput {
                    path: config.database.path.clone(),
                    ttl_days: config.database.geocode_ttl_days,
                    live: stats.live,
                    expired: stats.expired,
                },
                json_mode,
            );
        }
        CacheCommands::Purge => {
            let removed = cache.purge_expired().await?;
            output(&CachePurgeOutput { removed }, json_mode);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purge_output_pluralization() {
        assert_eq!(CachePurgeOutput { removed: 0 }.to_human(), "No expired geocode entries.");
        assert_eq!(CachePurgeOutput { removed: 1 }.to_human(), "Removed 1 expired geocode entry.");
        assert_eq!(CachePurgeOutput { removed: 7 }.to_human(), "Removed 7 expired geocode entries.");
    }

    #[tokio::test]
    async fn test_stats_and_purge_against_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.database.path = dir.path().join("geocode.db").to_string_lossy().into_owned();

        let args = CacheArgs {
            command: CacheCommands::Stats,
        };
        execute(args, config.clone(), true).await.unwrap();

        let args = CacheArgs {
            command: CacheCommands::Purge,
        };
        execute(args, config, true).await.unwrap();
    }
}
