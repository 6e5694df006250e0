// Configuration module entry point
// Loads layered configuration and holds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::AppError;

// Re-export public types
pub use state::AppState;
pub use types::{Config, DatabaseConfig, HttpConfig};

impl Config {
    /// Load configuration from `config_path` (extension optional), then
    /// `CLIMATE_<SECTION>__<KEY>` environment variables, over built-in defaults.
    /// A missing file is not an error.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("CLIMATE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "climate-api")?
            .set_default("http.enable_cors", false)?
            .set_default("http.pretty_json", false)?
            .set_default("database.path", "Resources/hawaii.sqlite")?
            .set_default("database.max_connections", 8)?
            .set_default("database.acquire_timeout_ms", 5000)?
            .set_default("climate.tobs_station", "USC00519281")?
            .set_default("climate.lookback_days", 365)?
            .set_default("climate.strict_dates", false)?
            .set_default("health.enabled", true)?
            .set_default("health.liveness_path", "/healthz")?
            .set_default("health.readiness_path", "/readyz")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| AppError::Address(format!("Invalid address: {e}")))
    }

    /// Longest time a single connection may stay open
    pub fn connection_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(std::cmp::max(
            self.performance.read_timeout,
            self.performance.write_timeout,
        ))
    }
}
