//! Fixed-content responders.

use crate::config::SiteConfig;
use crate::AppState;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

const HEALTHY: &str = "I'm healthy";

const ROBOTS: &str = "User-agent: *\nAllow: /";

/// GET /health
pub async fn health() -> &'static str {
    HEALTHY
}

/// GET /robots.txt
pub async fn robots() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/plain")], ROBOTS)
}

/// GET /sitemap.xml
pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    ([(CONTENT_TYPE, "application/xml")], sitemap_xml(&state.site))
}

/// GET /.well-known/security.txt
pub async fn security(State(state): State<AppState>) -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/plain")], security_txt(&state.site))
}

pub fn sitemap_xml(site: &SiteConfig) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
    <url>
        <loc>{}</loc>
    </url>
</urlset>"#,
        site.domain
    )
}

pub fn security_txt(site: &SiteConfig) -> String {
    format!(
        "Contact: {}\nExpires: {}\nCanonical: {}\n",
        site.security_contact,
        site.security_expires,
        site.security_canonical()
    )
}
