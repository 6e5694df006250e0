// Configuration types
// Every field has a default registered in `Config::load_from`, so a missing
// config file still deserializes.

use serde::Deserialize;

/// Full service configuration, one field per config file section
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub climate: ClimateConfig,
    pub health: HealthConfig,
}

/// `[server]`: bind address and runtime size
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads, one per core when unset
    pub workers: Option<usize>,
}

/// `[logging]`
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub level: String,
    pub access_log: bool,
    /// `combined`, `common`, `json` or a `$variable` pattern
    pub access_log_format: String,
    /// Append access lines here instead of stdout
    pub access_log_file: Option<String>,
}

/// `[performance]`, timeouts in seconds
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    /// Keep-alive switch: 0 disables it, any other value enables it.
    /// Connection lifetime, keep-alive reuse included, is capped by
    /// max(read_timeout, write_timeout).
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// `[http]`: headers and body formatting
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Value of the `Server` response header
    pub server_name: String,
    /// Adds `Access-Control-Allow-Origin: *`
    pub enable_cors: bool,
    /// Indent JSON bodies
    pub pretty_json: bool,
}

/// SQLite database configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Path to the pre-populated SQLite file
    pub path: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// How long a request waits for a free pooled connection
    pub acquire_timeout_ms: u64,
}

/// Query settings for the climate endpoints
#[derive(Debug, Deserialize, Clone)]
pub struct ClimateConfig {
    /// Station reported by `/api/v1.0/tobs`
    pub tobs_station: String,
    /// Size of the trailing window used by precipitation and tobs
    pub lookback_days: u32,
    /// Reject start/end values that are not `YYYY-MM-DD` with 400
    pub strict_dates: bool,
}

/// `[health]`: probe endpoints answered before API routing
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    pub enabled: bool,
    /// Always 200 while the process serves requests
    pub liveness_path: String,
    /// 200 only when a pooled connection answers a query
    pub readiness_path: String,
}
