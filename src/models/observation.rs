use crate::pricing::{normalize, NormalizeError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One stored price capture, as read back from the `monsters` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PriceObservation {
    pub id: i64,
    /// Price text exactly as the upstream API returned it
    pub gross_price: String,
    /// Minor currency units derived from `gross_price`
    pub gross_price_normalised: i64,
    pub created_at: DateTime<Utc>,
}

/// A price capture that has not been stored yet.
///
/// The only constructor normalizes the raw price, so the two values can
/// never disagree by the time they reach the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewObservation {
    gross_price: String,
    gross_price_normalised: i64,
}

impl NewObservation {
    pub fn from_raw(gross_price: impl Into<String>) -> Result<Self, NormalizeError> {
        let gross_price = gross_price.into();
        let gross_price_normalised = normalize(&gross_price)?;

        Ok(Self {
            gross_price,
            gross_price_normalised,
        })
    }

    pub fn gross_price(&self) -> &str {
        &self.gross_price
    }

    pub fn gross_price_normalised(&self) -> i64 {
        self.gross_price_normalised
    }
}
