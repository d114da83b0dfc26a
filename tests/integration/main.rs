//! Integration tests against the full router

mod api_tests;
mod client_tests;

use std::path::PathBuf;

use maintrack::{api, AppConfig, AppState};

/// Fresh, not yet created, data directory
pub fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("maintrack-it-{}", uuid::Uuid::new_v4()))
}

pub fn state(data_dir: PathBuf, write_timeout_ms: u64) -> AppState {
    let mut config = AppConfig::default();
    config.storage.data_dir = data_dir;
    config.storage.write_timeout_ms = write_timeout_ms;
    AppState::new(config)
}

pub fn app(data_dir: PathBuf) -> axum::Router {
    api::router(state(data_dir, 5000))
}
