//! Maintrack equipment and maintenance record keeping
//!
//! Two append-only collections (equipment and maintenance records) stored as
//! JSON files, a validating submission pipeline, table views and a dashboard
//! summary, served over a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the repository and services for `config`
    pub fn new(config: AppConfig) -> Self {
        let repository = repository::Repository::new(config.storage.data_dir.clone());
        let services = services::Services::new(repository, &config.storage);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
