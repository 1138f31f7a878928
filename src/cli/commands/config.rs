//! `config`: configuration inspection.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

const REDACTED: &str = "********";

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration with secrets redacted
    Show,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ConfigShowOutput {
    pub config: Config,
}

impl ConfigShowOutput {
    pub fn redacted(mut config: Config) -> Self {
        if config.github.token.is_some() {
            config.github.token = Some(REDACTED.to_string());
        }
        Self { config }
    }
}

impl CommandOutput for ConfigShowOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.config)
            .context("Failed to render configuration")
            .unwrap_or_else(|e| format!("{e:#}"))
    }
}

pub fn execute(args: ConfigArgs, config: Config, json_mode: bool) -> Result<()> {
    match args.command {
        ConfigCommands::Show => output(&ConfigShowOutput::redacted(config), json_mode),
    }
    Ok(())
}
