//! HTTP request handlers for the price pipeline.

use crate::error::AppResult;
use crate::models::PriceObservation;
use crate::AppState;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;

/// GET / - Render every observation, newest first
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let observations = state.observation_repo.list_all_descending().await?;
    Ok(Html(state.page.render(&observations)))
}

/// GET /insert-latest-monster-price - Capture and store the current price
pub async fn insert_latest_price(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.ingestion.ingest().await?;
    Ok(StatusCode::OK)
}

/// GET /get-latest-monster-price - Live price from upstream.
///
/// This reads the product API directly and never touches the store, so it
/// can disagree with the newest stored observation.
pub async fn get_latest_price(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let live = state.ingestion.current_price().await?;

    let body = format!(
        "Current Monster price: {}\nCurrent Monster normalised price : {}",
        live.gross_price, live.gross_price_normalised
    );

    Ok(([(CONTENT_TYPE, "text/plain")], body))
}

/// GET /get-raw-data - Every observation as a JSON array
pub async fn get_raw_data(State(state): State<AppState>) -> AppResult<Json<Vec<PriceObservation>>> {
    let observations = state.observation_repo.list_all_descending().await?;
    Ok(Json(observations))
}
