mod helpers;

use helpers::*;
use monster_index::config::DatabaseConfig;
use monster_index::database::{create_pool, ensure_schema};
use monster_index::models::NewObservation;
use monster_index::repositories::ObservationRepository;
use sqlx::Row;
use temp_dir::TempDir;

// ============================================================================
// Schema Tests
// ============================================================================

#[tokio::test]
async fn test_schema_has_expected_columns() {
    let pool = memory_pool().await;

    let rows = sqlx::query("SELECT name FROM pragma_table_info('monsters') ORDER BY cid")
        .fetch_all(&pool)
        .await
        .expect("Failed to read table info");

    let columns: Vec<String> = rows.iter().map(|row| row.get("name")).collect();
    assert_eq!(
        columns,
        vec!["id", "gross_price", "gross_price_normalised", "created_at"]
    );
}

// ============================================================================
// Observation Repository Tests
// ============================================================================

#[tokio::test]
async fn test_list_on_empty_store_is_empty() {
    let repo = ObservationRepository::new(memory_pool().await);

    let observations = repo
        .list_all_descending()
        .await
        .expect("Listing an empty store must not fail");

    assert!(observations.is_empty());
}

#[tokio::test]
async fn test_insert_then_list_preserves_price_text() {
    let repo = ObservationRepository::new(memory_pool().await);

    let new = NewObservation::from_raw("12.34").unwrap();
    let stored = repo.insert(&new).await.expect("Failed to insert");

    assert!(stored.id > 0);
    assert_eq!(stored.gross_price, "12.34");
    assert_eq!(stored.gross_price_normalised, 1234);

    let listed = repo.list_all_descending().await.expect("Failed to list");
    assert_eq!(listed, vec![stored]);
}

#[tokio::test]
async fn test_insert_keeps_locale_formatting() {
    let repo = ObservationRepository::new(memory_pool().await);

    let stored = repo
        .insert(&NewObservation::from_raw("34,90").unwrap())
        .await
        .expect("Failed to insert");

    assert_eq!(stored.gross_price, "34,90");
    assert_eq!(stored.gross_price_normalised, 3490);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let repo = ObservationRepository::new(memory_pool().await);

    let first = repo.insert(&NewObservation::from_raw("10.00").unwrap()).await.unwrap();
    let second = repo.insert(&NewObservation::from_raw("20.00").unwrap()).await.unwrap();
    let third = repo.insert(&NewObservation::from_raw("30.00").unwrap()).await.unwrap();

    assert!(first.created_at <= second.created_at);
    assert!(second.created_at <= third.created_at);

    let ids: Vec<i64> = repo
        .list_all_descending()
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();

    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[tokio::test]
async fn test_list_orders_by_created_at_not_id() {
    let pool = memory_pool().await;

    // Rows written with explicit timestamps, out of id order
    for (price, minor, created_at) in [
        ("2.00", 200, "2024-01-02T00:00:00.000Z"),
        ("3.00", 300, "2024-01-03T00:00:00.000Z"),
        ("1.00", 100, "2024-01-01T00:00:00.000Z"),
    ] {
        sqlx::query(
            "INSERT INTO monsters (gross_price, gross_price_normalised, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(price)
        .bind(minor)
        .bind(created_at)
        .execute(&pool)
        .await
        .unwrap();
    }

    let repo = ObservationRepository::new(pool);
    let prices: Vec<String> = repo
        .list_all_descending()
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.gross_price)
        .collect();

    assert_eq!(prices, vec!["3.00", "2.00", "1.00"]);
}

#[tokio::test]
async fn test_ids_are_not_reused() {
    let pool = memory_pool().await;
    let repo = ObservationRepository::new(pool.clone());

    let first = repo.insert(&NewObservation::from_raw("1.00").unwrap()).await.unwrap();

    // Removal is not part of the service; this only checks the id sequence
    sqlx::query("DELETE FROM monsters").execute(&pool).await.unwrap();

    let second = repo.insert(&NewObservation::from_raw("1.00").unwrap()).await.unwrap();
    assert!(second.id > first.id);
}

// ============================================================================
// File-backed Store Tests
// ============================================================================

#[tokio::test]
async fn test_file_store_is_created_and_persists() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("monsterdatabase.db");

    let config = DatabaseConfig {
        path: path.to_string_lossy().into_owned(),
        max_connections: 4,
        acquire_timeout_secs: 5,
    };

    let pool = create_pool(&config).await.expect("Failed to create pool");
    ensure_schema(&pool).await.unwrap();
    ObservationRepository::new(pool.clone())
        .insert(&NewObservation::from_raw("19.99").unwrap())
        .await
        .unwrap();
    pool.close().await;

    assert!(path.exists());

    let reopened = create_pool(&config).await.expect("Failed to reopen pool");
    ensure_schema(&reopened).await.unwrap();
    let observations = ObservationRepository::new(reopened)
        .list_all_descending()
        .await
        .unwrap();

    assert_eq!(observations.len(), 1);
    assert_eq!(observations[0].gross_price_normalised, 1999);
}
