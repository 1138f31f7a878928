use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use std::path::Path;
use thiserror::Error;

use crate::adapters::github::client::MAX_SEARCH_RESULTS;
use crate::domain::models::config::Config;
use crate::services::refresh_scheduler::parse_cron;

/// Project-local configuration directory.
pub const CONFIG_DIR: &str = ".repo-globe";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid top_n: {0}. Must be between 1 and 1000")]
    InvalidTopN(u32),

    #[error("Invalid max_concurrency: {0}. Must be at least 1")]
    InvalidConcurrency(usize),

    #[error("Invalid rate limit for {0}: must be at least 1")]
    InvalidRateLimit(&'static str),

    #[error("Invalid offset_step_degrees: {0}. Must be a non-negative finite number")]
    InvalidOffsetStep(f64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Invalid cron expression: {0}")]
    InvalidCron(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid geocode_ttl_days: {0}. Must be at least 1")]
    InvalidGeocodeTtl(u32),

    #[error("Invalid server port: 0")]
    InvalidPort,

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .repo-globe/config.yaml
    /// 3. .repo-globe/local.yaml (optional local overrides)
    /// 4. Environment variables (REPO_GLOBE_* prefix, `__` for nesting)
    /// 5. GITHUB_TOKEN, mapped to `github.token`
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment(&[
            Path::new(CONFIG_DIR).join("config.yaml").as_path(),
            Path::new(CONFIG_DIR).join("local.yaml").as_path(),
        ])
        .extract()
        .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file in place of the project YAML
    /// layers. Environment overrides still apply.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Self::figment(&[path])
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment(yaml_files: &[&Path]) -> Figment {
        let figment = yaml_files.iter().fold(
            Figment::new().merge(Serialized::defaults(Config::default())),
            |figment, file| figment.merge(Yaml::file(file)),
        );

        figment
            .merge(Env::prefixed("REPO_GLOBE_").split("__"))
            .merge(Env::raw().only(&["GITHUB_TOKEN"]).map(|_| "github.token".into()))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.github.top_n == 0 || config.github.top_n > MAX_SEARCH_RESULTS {
            return Err(ConfigError::InvalidTopN(config.github.top_n));
        }

        if config.github.requests_per_hour == 0 {
            return Err(ConfigError::InvalidRateLimit("github.requests_per_hour"));
        }

        if config.geocoder.requests_per_second == 0 {
            return Err(ConfigError::InvalidRateLimit("geocoder.requests_per_second"));
        }

        if config.pipeline.max_concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(config.pipeline.max_concurrency));
        }

        let step = config.pipeline.offset_step_degrees;
        if !step.is_finite() || step < 0.0 {
            return Err(ConfigError::InvalidOffsetStep(step));
        }

        if let Err(err) = parse_cron(&config.schedule.cron) {
            return Err(ConfigError::InvalidCron(err.to_string()));
        }

        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        if config.database.geocode_ttl_days == 0 {
            return Err(ConfigError::InvalidGeocodeTtl(config.database.geocode_ttl_days));
        }

        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        if config.retry.initial_backoff_ms >= config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        Ok(())
    }
}
