use crate::error::AppResult;
use crate::models::{NewObservation, PriceObservation};
use crate::pricing::{normalize, PriceFetcher};
use crate::repositories::ObservationRepository;
use std::sync::Arc;
use tracing::info;

/// A price read straight from the upstream API, not from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivePrice {
    pub gross_price: String,
    pub gross_price_normalised: i64,
}

/// Service driving the fetch, normalize and store pipeline
pub struct IngestionService {
    fetcher: Arc<dyn PriceFetcher>,
    observation_repo: Arc<ObservationRepository>,
}

impl IngestionService {
    pub fn new(fetcher: Arc<dyn PriceFetcher>, observation_repo: Arc<ObservationRepository>) -> Self {
        Self {
            fetcher,
            observation_repo,
        }
    }

    /// Capture the current price and append it as a new observation.
    ///
    /// Nothing is written unless both the fetch and the normalization
    /// succeed. Repeated calls always append; there is no deduplication.
    pub async fn ingest(&self) -> AppResult<PriceObservation> {
        let raw = self.fetcher.fetch().await?;
        let observation = NewObservation::from_raw(raw)?;

        info!(
            "Inserting monster price into database: gross_price={}, normalised={}",
            observation.gross_price(),
            observation.gross_price_normalised()
        );

        let stored = self.observation_repo.insert(&observation).await?;

        info!(
            "Monster price inserted into database: id={}, created_at={}",
            stored.id, stored.created_at
        );

        Ok(stored)
    }

    /// Fetch and normalize the current price without storing it
    pub async fn current_price(&self) -> AppResult<LivePrice> {
        let gross_price = self.fetcher.fetch().await?;
        let gross_price_normalised = normalize(&gross_price)?;

        Ok(LivePrice {
            gross_price,
            gross_price_normalised,
        })
    }
}
