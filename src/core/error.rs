//! Typed error handling for the analytics API
//!
//! # Error Categories
//!
//! - [`StoreError`]: failures in the transaction store
//! - [`ConfigError`]: environment configuration problems at startup
//!
//! Malformed filter input never becomes an error at all: unparseable
//! JSON-encoded parameters, dates and numeric bounds degrade to "constraint
//! absent" inside the filter builder. The variants here cover the store and
//! startup failure paths that remain.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The main error type for the analytics service
#[derive(Debug)]
pub enum ApiError {
    /// Transaction store errors
    Store(StoreError),

    /// Configuration errors
    Config(ConfigError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Store(e) => write!(f, "{}", e),
            ApiError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Store(e) => Some(e),
            ApiError::Config(e) => Some(e),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Store(e) => e.error_code(),
            ApiError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

/// Failures in the transaction store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store access failed: {message}")]
    AccessFailed { message: String },
}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::AccessFailed { .. } => "STORE_ACCESS_FAILED",
        }
    }
}

/// Environment configuration problems at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {variable}: {message}")]
    InvalidValue {
        variable: String,
        value: String,
        message: String,
    },
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::Config(err)
    }
}

/// Store and report internals use `anyhow`; the boundary maps those to a
/// store-level failure with the cause preserved in the message.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Store(StoreError::AccessFailed {
            message: err.to_string(),
        })
    }
}

/// A specialized Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::AccessFailed {
            message: "lock poisoned".to_string(),
        };
        assert!(err.to_string().contains("Store access failed"));
        assert!(err.to_string().contains("lock poisoned"));
    }

    #[test]
    fn test_status_codes() {
        let err: ApiError = StoreError::AccessFailed {
            message: "down".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: ApiError = ConfigError::InvalidValue {
            variable: "PORT".to_string(),
            value: "loud".to_string(),
            message: "expected a port number".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_codes() {
        let err: ApiError = StoreError::AccessFailed {
            message: "down".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "STORE_ACCESS_FAILED");

        let err: ApiError = ConfigError::InvalidValue {
            variable: "PORT".to_string(),
            value: "loud".to_string(),
            message: "expected a port number".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_anyhow_maps_to_store_error() {
        let err: ApiError = anyhow::anyhow!("connection refused").into();
        assert!(matches!(
            err,
            ApiError::Store(StoreError::AccessFailed { .. })
        ));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_error_response_body() {
        let err: ApiError = StoreError::AccessFailed {
            message: "down".to_string(),
        }
        .into();
        let body = err.to_response();
        assert_eq!(body.code, "STORE_ACCESS_FAILED");
        assert!(body.message.contains("down"));
    }
}
