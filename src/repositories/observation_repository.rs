use crate::models::{NewObservation, PriceObservation};
use sqlx::{Result as SqlxResult, SqlitePool};

/// Repository for the append-only `monsters` table
pub struct ObservationRepository {
    pool: SqlitePool,
}

impl ObservationRepository {
    /// Create a new ObservationRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append one observation; the store assigns `id` and `created_at`
    pub async fn insert(&self, observation: &NewObservation) -> SqlxResult<PriceObservation> {
        sqlx::query_as::<_, PriceObservation>(
            r#"
            INSERT INTO monsters (gross_price, gross_price_normalised)
            VALUES (?1, ?2)
            RETURNING id, gross_price, gross_price_normalised, created_at
            "#,
        )
        .bind(observation.gross_price())
        .bind(observation.gross_price_normalised())
        .fetch_one(&self.pool)
        .await
    }

    /// Every observation, newest first
    pub async fn list_all_descending(&self) -> SqlxResult<Vec<PriceObservation>> {
        sqlx::query_as::<_, PriceObservation>(
            r#"
            SELECT id, gross_price, gross_price_normalised, created_at
            FROM monsters
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
