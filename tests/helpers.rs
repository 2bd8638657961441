#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use monster_index::config::{DatabaseConfig, SiteConfig};
use monster_index::database::{create_pool, ensure_schema, MEMORY_PATH};
use monster_index::http::router;
use monster_index::pricing::{FetchError, PriceFetcher};
use monster_index::repositories::ObservationRepository;
use monster_index::template::PageTemplate;
use monster_index::AppState;
use sqlx::SqlitePool;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// What the stub upstream answers for one fetch
#[derive(Debug, Clone)]
pub enum Upstream {
    Price(String),
    Status(u16),
    Garbage(String),
}

/// Scripted stand-in for the storefront API.
///
/// Answers are consumed in order; the last one repeats forever.
pub struct StubFetcher {
    script: Mutex<VecDeque<Upstream>>,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn script(answers: Vec<Upstream>) -> Arc<Self> {
        assert!(!answers.is_empty(), "stub needs at least one answer");
        Arc::new(Self {
            script: Mutex::new(answers.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn price(price: &str) -> Arc<Self> {
        Self::script(vec![Upstream::Price(price.to_string())])
    }

    pub fn prices(prices: &[&str]) -> Arc<Self> {
        Self::script(prices.iter().map(|p| Upstream::Price(p.to_string())).collect())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceFetcher for StubFetcher {
    async fn fetch(&self) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let answer = {
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.pop_front().unwrap()
            } else {
                script.front().cloned().unwrap()
            }
        };

        match answer {
            Upstream::Price(price) => Ok(price),
            Upstream::Status(status) => Err(FetchError::Status(status)),
            Upstream::Garbage(body) => monster_index::pricing::fetcher::parse_gross_price(&body),
        }
    }
}

/// In-memory store with the schema applied
pub async fn memory_pool() -> SqlitePool {
    let config = DatabaseConfig {
        path: MEMORY_PATH.to_string(),
        ..DatabaseConfig::default()
    };

    let pool = create_pool(&config)
        .await
        .expect("Failed to create test database pool");

    ensure_schema(&pool)
        .await
        .expect("Failed to create schema");

    pool
}

/// A full application wired to a fresh in-memory store
pub struct TestApp {
    pub pool: SqlitePool,
    pub repo: ObservationRepository,
    pub fetcher: Arc<StubFetcher>,
    pub router: Router,
}

impl TestApp {
    pub async fn new(fetcher: Arc<StubFetcher>) -> Self {
        let pool = memory_pool().await;
        let state = AppState::new(
            pool.clone(),
            fetcher.clone(),
            PageTemplate::index().expect("bundled page must compile"),
            SiteConfig::default(),
        );

        Self {
            repo: ObservationRepository::new(pool.clone()),
            pool,
            fetcher,
            router: router(state),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri).await
    }

    pub async fn post(&self, uri: &str) -> TestResponse {
        self.request(Method::POST, uri).await
    }

    pub async fn request(&self, method: Method, uri: &str) -> TestResponse {
        self.request_with_headers(method, uri, &[]).await
    }

    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("user-agent", "monster-index-tests");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Body::empty()).expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("readable body")
            .to_bytes();

        TestResponse {
            status,
            content_type,
            body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
        }
    }
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn content_type_starts_with(&self, prefix: &str) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.starts_with(prefix))
            .unwrap_or(false)
    }
}
