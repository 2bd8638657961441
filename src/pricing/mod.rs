//! Fetching and normalizing the tracked product's price.

pub mod fetcher;
pub mod normalize;

pub use fetcher::{FetchError, OdaPriceFetcher, PriceFetcher};
pub use normalize::{normalize, NormalizeError};
