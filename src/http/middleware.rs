//! Request logging middleware.

use axum::extract::{ConnectInfo, Request};
use axum::http::{HeaderMap, Method, Uri, Version};
use axum::middleware::Next;
use axum::response::Response;
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{debug, info};

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";

/// One access log line, written before the handler runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLogEntry {
    pub message: &'static str,
    pub ip: String,
    /// `"<METHOD> <path> <protocol>"`
    pub event: String,
    /// Always `-`; the status is not known yet when the line is written
    pub status: &'static str,
    pub user_agent: String,
}

impl RequestLogEntry {
    pub fn from_parts(
        headers: &HeaderMap,
        method: &Method,
        uri: &Uri,
        version: Version,
        remote: Option<SocketAddr>,
    ) -> Self {
        let user_agent = header_value(headers, axum::http::header::USER_AGENT.as_str())
            .unwrap_or_default()
            .to_string();

        Self {
            message: "Request incoming",
            ip: client_ip(headers, remote),
            event: format!("{} {} {:?}", method, uri.path(), version),
            status: "-",
            user_agent,
        }
    }

    pub fn from_request(req: &Request) -> Self {
        let remote = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Self::from_parts(req.headers(), req.method(), req.uri(), req.version(), remote)
    }
}

/// Best guess at the caller's address.
///
/// Prefers the first hop of `X-Forwarded-For`, then `X-Real-IP`, then the
/// socket peer address. Empty when none is known.
pub fn client_ip(headers: &HeaderMap, remote: Option<SocketAddr>) -> String {
    if let Some(forwarded) = header_value(headers, FORWARDED_FOR) {
        if let Some(first) = forwarded.split(',').map(str::trim).find(|hop| !hop.is_empty()) {
            return first.to_string();
        }
    }

    if let Some(real_ip) = header_value(headers, REAL_IP) {
        return real_ip.trim().to_string();
    }

    remote.map(|addr| addr.to_string()).unwrap_or_default()
}

fn header_value<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
}

/// Write one access line per request, then run the handler.
///
/// The entry goes out as structured fields, which the JSON subscriber
/// flattens into a single object per line.
pub async fn log_request(req: Request, next: Next) -> Response {
    let entry = RequestLogEntry::from_request(&req);

    info!(
        target: "access",
        ip = %entry.ip,
        event = %entry.event,
        status = entry.status,
        user_agent = %entry.user_agent,
        "{}",
        entry.message
    );

    let started = Instant::now();
    let response = next.run(req).await;

    debug!(
        target: "access",
        event = %entry.event,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}
