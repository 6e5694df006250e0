mod api;
mod config;
mod db;
mod error;
mod handler;
mod http;
mod logger;
mod routing;
mod server;

use std::sync::Arc;

use db::ClimateStore;
use error::AppError;
use server::{create_reusable_listener, start_server_loop, ShutdownSignal};

/// Config file used when no path is given on the command line
const DEFAULT_CONFIG: &str = "config";

fn main() -> Result<(), AppError> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    // Size the runtime from `server.workers`, one thread per core otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), AppError> {
    let addr = cfg.get_socket_addr()?;
    let store = ClimateStore::open(&cfg.database)?;
    let listener = create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &cfg);
    let state = Arc::new(config::AppState::new(cfg, store));

    let shutdown = Arc::new(ShutdownSignal::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    start_server_loop(listener, state, shutdown).await
}
