// src/state.rs
use std::sync::Arc;

use crate::config::RelayConfig;
use crate::services::relay::RelayClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: RelayConfig,
    pub relay: RelayClient,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            relay: RelayClient::new(),
        }
    }
}
