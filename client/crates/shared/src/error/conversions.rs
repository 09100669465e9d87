//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`].

use super::app_error::AppError;
use super::kind::ErrorKind;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::Forbidden,
            std::io::ErrorKind::TimedOut => ErrorKind::RequestTimeout,
            std::io::ErrorKind::ConnectionRefused | std::io::ErrorKind::ConnectionReset => {
                ErrorKind::ServiceUnavailable
            }
            _ => ErrorKind::InternalServerError,
        };
        AppError::new(kind, "I/O operation failed").with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        // 受信したペイロードが想定と異なる場合はサーバー側の問題として扱う
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::bad_gateway(format!("Unexpected response payload: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// reqwest conversions (feature-gated)
// ============================================================================

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return AppError::timeout("Request timed out").with_source(err);
        }
        if err.is_connect() {
            return AppError::service_unavailable("Server unreachable").with_source(err);
        }
        if err.is_decode() {
            return AppError::bad_gateway("Unreadable response body").with_source(err);
        }
        match err.status() {
            Some(status) => {
                AppError::from_status(status.as_u16(), "Request rejected").with_source(err)
            }
            None => AppError::internal("HTTP client error").with_source(err),
        }
    }
}

#[cfg(feature = "reqwest")]
impl From<http::header::InvalidHeaderValue> for AppError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        AppError::internal("Invalid header value").with_source(err)
    }
}
