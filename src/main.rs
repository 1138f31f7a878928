//! repo-globe CLI entry point.

use clap::Parser;

use repo_globe::cli::{self, commands, Cli, Commands};
use repo_globe::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => cli::handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::Refresh(args) => commands::refresh::execute(args, config, cli.json).await,
        Commands::Cache(args) => commands::cache::execute(args, config, cli.json).await,
        Commands::Config(args) => commands::config::execute(args, config, cli.json),
    };

    if let Err(err) = result {
        cli::handle_error(err, cli.json);
    }
}
