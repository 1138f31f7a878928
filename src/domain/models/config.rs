use serde::{Deserialize, Serialize};

/// Main configuration structure for repo-globe
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Ranked-list and profile gateway (GitHub) configuration
    #[serde(default)]
    pub github: GitHubConfig,

    /// Free-text geocoder (Nominatim) configuration
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Aggregation pipeline tuning
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Refresh schedule
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Geocode cache database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// HTTP serving configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Retry policy for the ranked-list request
    #[serde(default)]
    pub retry: RetryConfig,
}

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubConfig {
    /// Personal access token. Required; a cycle is skipped without it.
    #[serde(default)]
    pub token: Option<String>,

    /// Base URL for the REST API
    #[serde(default = "default_github_api_base_url")]
    pub api_base_url: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Only repositories with more stars than this are listed
    #[serde(default = "default_min_stars")]
    pub min_stars: u32,

    /// Number of top repositories per cycle (1-1000)
    #[serde(default = "default_top_n")]
    pub top_n: u32,

    /// Outbound request budget per hour
    #[serde(default = "default_requests_per_hour")]
    pub requests_per_hour: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_github_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    "Open-Source-Globe".to_string()
}

const fn default_min_stars() -> u32 {
    1000
}

const fn default_top_n() -> u32 {
    100
}

const fn default_requests_per_hour() -> u32 {
    5000
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base_url: default_github_api_base_url(),
            user_agent: default_user_agent(),
            min_stars: default_min_stars(),
            top_n: default_top_n(),
            requests_per_hour: default_requests_per_hour(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Geocoder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GeocoderConfig {
    /// Base URL of the Nominatim-compatible search service
    #[serde(default = "default_geocoder_base_url")]
    pub base_url: String,

    /// User-Agent header; Nominatim rejects anonymous clients
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Outbound request budget per second
    #[serde(default = "default_geocoder_rps")]
    pub requests_per_second: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geocoder_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoder_rps() -> u32 {
    1
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_base_url(),
            user_agent: default_user_agent(),
            requests_per_second: default_geocoder_rps(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Aggregation pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PipelineConfig {
    /// Maximum in-flight profile+geocode resolutions per cycle
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Owner profile cache TTL in seconds
    #[serde(default = "default_profile_cache_ttl_secs")]
    pub profile_cache_ttl_secs: u64,

    /// Maximum number of cached owner profiles
    #[serde(default = "default_profile_cache_capacity")]
    pub profile_cache_capacity: u64,

    /// Degrees added per overlapping entry sharing a rounded coordinate
    #[serde(default = "default_offset_step_degrees")]
    pub offset_step_degrees: f64,
}

const fn default_max_concurrency() -> usize {
    5
}

const fn default_profile_cache_ttl_secs() -> u64 {
    3600
}

const fn default_profile_cache_capacity() -> u64 {
    10_000
}

const fn default_offset_step_degrees() -> f64 {
    0.5
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            profile_cache_ttl_secs: default_profile_cache_ttl_secs(),
            profile_cache_capacity: default_profile_cache_capacity(),
            offset_step_degrees: default_offset_step_degrees(),
        }
    }
}

/// Refresh schedule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScheduleConfig {
    /// Cron expression (with seconds field) for refresh cycles
    #[serde(default = "default_cron")]
    pub cron: String,

    /// Run one cycle immediately when the scheduler starts
    #[serde(default = "default_true")]
    pub run_on_start: bool,
}

fn default_cron() -> String {
    "0 0 * * * *".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cron: default_cron(),
            run_on_start: default_true(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Days a geocode entry stays valid after its last write
    #[serde(default = "default_geocode_ttl_days")]
    pub geocode_ttl_days: u32,
}

fn default_database_path() -> String {
    ".repo-globe/geocode.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

const fn default_geocode_ttl_days() -> u32 {
    30
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
            geocode_ttl_days: default_geocode_ttl_days(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allow cross-origin requests from the front end
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_true(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum number of retry attempts; 0 disables retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    1000
}

const fn default_max_backoff_ms() -> u64 {
    30_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}
