use crate::database::DatabaseError;
use crate::pricing::{FetchError, NormalizeError};
use crate::template::TemplateError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sqlx::Error as SqlxError;
use thiserror::Error;
use tracing::{error, warn};

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Upstream price API errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Price string could not be normalized
    #[error("Normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLx database errors
    #[error("SQL error: {0}")]
    Sqlx(#[from] SqlxError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Page template errors
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Generic error with message
    #[error("{0}")]
    Message(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Check if the error came from the upstream price API
    pub fn is_upstream_error(&self) -> bool {
        matches!(self, AppError::Fetch(_) | AppError::Normalize(_))
    }

    /// Check if error is a database connection error
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            AppError::Database(DatabaseError::PoolCreation(_))
                | AppError::Sqlx(SqlxError::PoolTimedOut)
                | AppError::Sqlx(SqlxError::PoolClosed)
        )
    }

    /// Get HTTP status code for the error
    ///
    /// None of the routes take caller input, so every failure is ours.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_upstream_error() {
            warn!(status = status.as_u16(), "Upstream price unavailable: {}", self);
        } else {
            error!(
                status = status.as_u16(),
                connection = self.is_connection_error(),
                "Request failed: {}",
                self
            );
        }
        (status, self.to_string()).into_response()
    }
}

/// Convenience function to convert Result<T, E> to AppResult<T>
pub fn map_to_app_error<T, E: std::error::Error>(result: Result<T, E>, context: &str) -> AppResult<T> {
    result.map_err(|e| AppError::Message(format!("{}: {}", context, e)))
}
