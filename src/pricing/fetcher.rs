use crate::config::FetcherConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("price request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("price endpoint answered with status {0}")]
    Status(u16),

    #[error("unexpected price response: {0}")]
    Decode(String),
}

/// The subset of the product document we care about
#[derive(Debug, Deserialize)]
struct ProductResponse {
    gross_price: String,
}

/// Source of the current raw price string
#[async_trait]
pub trait PriceFetcher: Send + Sync {
    async fn fetch(&self) -> Result<String, FetchError>;
}

/// Fetches the product document from the Oda storefront API
pub struct OdaPriceFetcher {
    client: Client,
    endpoint: String,
}

impl OdaPriceFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        // The storefront's certificate chain does not always verify
        let client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(config.timeout())
            .user_agent(concat!("monster-index/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PriceFetcher for OdaPriceFetcher {
    async fn fetch(&self) -> Result<String, FetchError> {
        debug!("Fetching price from {}", self.endpoint);

        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_gross_price(&body)
    }
}

/// Extract `gross_price` from a product document
pub fn parse_gross_price(body: &str) -> Result<String, FetchError> {
    serde_json::from_str::<ProductResponse>(body)
        .map(|product| product.gross_price)
        .map_err(|e| FetchError::Decode(e.to_string()))
}
