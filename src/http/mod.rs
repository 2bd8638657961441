//! HTTP surface: routes, handlers and the access log middleware.

pub mod handlers;
pub mod middleware;
pub mod static_pages;

use crate::AppState;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

/// Build the application router.
///
/// Every route answers both GET and POST; the ingestion trigger is usually
/// hit by a scheduler that may use either.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::index))
        .route(
            "/insert-latest-monster-price",
            get(handlers::insert_latest_price).post(handlers::insert_latest_price),
        )
        .route(
            "/get-latest-monster-price",
            get(handlers::get_latest_price).post(handlers::get_latest_price),
        )
        .route(
            "/get-raw-data",
            get(handlers::get_raw_data).post(handlers::get_raw_data),
        )
        .route("/health", get(static_pages::health).post(static_pages::health))
        .route("/robots.txt", get(static_pages::robots).post(static_pages::robots))
        .route("/sitemap.xml", get(static_pages::sitemap).post(static_pages::sitemap))
        .route(
            "/.well-known/security.txt",
            get(static_pages::security).post(static_pages::security),
        )
        .with_state(state)
        .layer(from_fn(middleware::log_request))
}
