//! CLI type definitions
//!
//! Clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::cache::CacheArgs;
use super::commands::config::ConfigArgs;
use super::commands::refresh::RefreshArgs;
use super::commands::serve::ServeArgs;

#[derive(Parser)]
#[command(name = "repo-globe")]
#[command(about = "Top GitHub repositories placed on a globe by owner location", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .repo-globe/*.yaml
    #[arg(short, long, global = true, env = "REPO_GLOBE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the scheduler and serve the snapshot over HTTP
    Serve(ServeArgs),

    /// Run one refresh cycle and print the result
    Refresh(RefreshArgs),

    /// Geocode cache maintenance
    Cache(CacheArgs),

    /// Configuration inspection
    Config(ConfigArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::cache::CacheCommands;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["repo-globe", "cache", "stats", "--json", "-c", "custom.yaml"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
        assert!(matches!(
            cli.command,
            Commands::Cache(CacheArgs {
                command: CacheCommands::Stats
            })
        ));
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["repo-globe", "serve", "--port", "8080", "--skip-initial-refresh"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.skip_initial_refresh);
            }
            _ => panic!("expected serve"),
        }
    }
}
