//! Monster Index
//!
//! Tracks the price of a single retail product over time. Each ingestion
//! call fetches the current price from the storefront API, normalizes it to
//! minor currency units and appends it to a SQLite table; the read
//! endpoints render that series as HTML, JSON or plain text.

pub mod config;
pub mod database;
pub mod error;
pub mod http;
pub mod models;
pub mod pricing;
pub mod repositories;
pub mod services;
pub mod telemetry;
pub mod template;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use config::SiteConfig;
use pricing::PriceFetcher;
use repositories::ObservationRepository;
use services::IngestionService;
use sqlx::SqlitePool;
use std::sync::Arc;
use template::PageTemplate;

/// Application state shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub observation_repo: Arc<ObservationRepository>,
    pub ingestion: Arc<IngestionService>,
    pub page: Arc<PageTemplate>,
    pub site: Arc<SiteConfig>,
}

impl AppState {
    /// Create a new AppState around an initialized pool and a compiled page
    pub fn new(
        pool: SqlitePool,
        fetcher: Arc<dyn PriceFetcher>,
        page: PageTemplate,
        site: SiteConfig,
    ) -> Self {
        let observation_repo = Arc::new(ObservationRepository::new(pool));

        Self {
            ingestion: Arc::new(IngestionService::new(fetcher, observation_repo.clone())),
            observation_repo,
            page: Arc::new(page),
            site: Arc::new(site),
        }
    }
}
