//! Logger module
//!
//! Provides logging utilities for the climate API server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//!
//! Diagnostics go through `tracing`; access log lines go through the
//! access log writer so they can be sent to their own file.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::io;
use std::net::SocketAddr;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Initialize the logger with configuration
///
/// Should be called once at application startup. `RUST_LOG` overrides
/// `logging.level` when set.
pub fn init(config: &Config) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .map_err(io::Error::other)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(io::Error::other)?;

    writer::init(config.logging.access_log_file.as_deref())
}

/// Write to access log
fn write_access(message: &str) {
    match writer::get() {
        Some(sink) => sink.write_line(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    info!("======================================");
    info!("Climate API server started successfully");
    info!("Listening on: http://{addr}");
    info!("Database: {}", config.database.path);
    info!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        info!("Worker threads: {workers}");
    }
    if let Some(max) = config.performance.max_connections {
        info!("Max connections: {max}");
    }
    if let Some(ref path) = config.logging.access_log_file {
        info!("Access log: {path}");
    }
    if config.climate.strict_dates {
        info!("Strict date validation enabled");
    }
    info!("======================================");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    error!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    error!("{message}");
}

pub fn log_warning(message: &str) {
    warn!("{message}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_shutdown_started(active: usize) {
    info!("Shutdown requested, waiting for {active} active connection(s)");
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        info!("All connections closed, server stopped");
    } else {
        warn!("Grace period elapsed with {remaining} connection(s) still open, server stopped");
    }
}
