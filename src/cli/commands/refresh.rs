//! `refresh`: run one cycle in the foreground.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::context::{build_pipeline, open_geocode_cache};
use crate::cli::output::{list_table, output, truncate, CommandOutput};
use crate::domain::models::{Config, EnrichedRepository};
use crate::services::{RefreshOutcome, SnapshotStore};

#[derive(Args, Debug)]
pub struct RefreshArgs {
    /// Maximum rows to print in human output
    #[arg(short, long, default_value = "25")]
    pub limit: usize,
}

#[derive(Debug, Serialize)]
pub struct RefreshOutput {
    pub result: RefreshOutcome,
    pub repositories: Vec<EnrichedRepository>,
    #[serde(skip)]
    pub display_limit: usize,
}

impl CommandOutput for RefreshOutput {
    fn to_human(&self) -> String {
        let summary = match self.result {
            RefreshOutcome::Published {
                total,
                published,
                dropped,
            } => format!("Published {published} of {total} repositories ({dropped} without a location)."),
            RefreshOutcome::Skipped => return "A refresh cycle is already running.".to_string(),
            RefreshOutcome::Misconfigured => {
                return "No GitHub token configured; set GITHUB_TOKEN or github.token.".to_string();
            }
            RefreshOutcome::Aborted => {
                return "Failed to fetch the ranked list; see logs for details.".to_string();
            }
        };

        if self.repositories.is_empty() {
            return summary;
        }

        let mut table = list_table(&["#", "repository", "stars", "language", "lat", "lon"]);
        for (rank, repo) in self.repositories.iter().take(self.display_limit).enumerate() {
            let (lat, lon) = repo
                .owner
                .location
                .map(|c| (format!("{:.4}", c.lat), format!("{:.4}", c.lon)))
                .unwrap_or_default();
            table.add_row(vec![
                (rank + 1).to_string(),
                truncate(&repo.full_name, 40),
                repo.stargazers_count.to_string(),
                repo.language.clone().unwrap_or_else(|| "-".to_string()),
                lat,
                lon,
            ]);
        }

        format!("{summary}\n\n{table}")
    }
}

pub async fn execute(args: RefreshArgs, config: Config, json_mode: bool) -> Result<()> {
    let geocode_cache = open_geocode_cache(&config).await?;
    let snapshots = SnapshotStore::new();
    let pipeline = build_pipeline(&config, geocode_cache, snapshots.clone())?;

    let result = pipeline.run_cycle().await;
    let snapshot = snapshots.current().await;

    output(
        &RefreshOutput {
            result,
            repositories: snapshot.repositories.clone(),
            display_limit: args.limit,
        },
        json_mode,
    );

    if matches!(result, RefreshOutcome::Misconfigured | RefreshOutcome::Aborted) {
        anyhow::bail!("refresh did not publish a snapshot");
    }
    Ok(())
}
