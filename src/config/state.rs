// Application state module
// Shared, read-only state handed to every request

use super::types::Config;
use crate::db::ClimateStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: ClimateStore,
}

impl AppState {
    pub const fn new(config: Config, store: ClimateStore) -> Self {
        Self { config, store }
    }
}
