//! Auth Error Types
//!
//! This module provides session/gateway error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::storage::StorageError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
///
/// Only [`AuthError::Unauthorized`] is handled globally (forced logout);
/// everything else is returned to the calling screen.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Server rejected the credential (401)
    #[error("Session expired or invalid")]
    Unauthorized,

    /// Authenticated but not permitted (403)
    #[error("Not enough permissions")]
    Forbidden { detail: Option<String> },

    /// Any other non-success response
    #[error("Request rejected with status {status}")]
    Rejected { status: u16, detail: Option<String> },

    /// Request exceeded the configured upper bound
    #[error("Request timed out")]
    Timeout,

    /// Server unreachable or connection dropped
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body did not match the expected shape
    #[error("Unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Server issued an unusable credential
    #[error("Server returned an empty access token")]
    InvalidToken,

    /// Request could not be built (bad path, header, or form input)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Credential persistence failed
    #[error("Credential storage error: {0}")]
    Storage(#[from] StorageError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::Forbidden { .. } => ErrorKind::Forbidden,
            AuthError::Rejected { status, .. } => ErrorKind::from_status(*status),
            AuthError::Timeout => ErrorKind::RequestTimeout,
            AuthError::Transport(_) => ErrorKind::ServiceUnavailable,
            AuthError::Decode(_) | AuthError::InvalidToken => ErrorKind::BadGateway,
            AuthError::InvalidRequest(_) => ErrorKind::BadRequest,
            AuthError::Storage(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::Rejected { status, .. } => *status,
            other => other.kind().status_code(),
        }
    }

    /// Server-provided explanation, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            AuthError::Forbidden { detail } | AuthError::Rejected { detail, .. } => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    /// Whether this error means the session is no longer valid
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::Unauthorized)
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self.detail() {
            Some(detail) => err.with_detail(detail),
            None => err,
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AuthError::Storage(e) => {
                tracing::error!(error = %e, "Credential storage error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Unauthorized => {
                tracing::warn!("Request rejected as unauthorized");
            }
            AuthError::Transport(msg) => {
                tracing::warn!(error = %msg, "Server unreachable");
            }
            AuthError::Timeout => {
                tracing::warn!("Request timed out");
            }
            _ => {
                tracing::debug!(error = %self, "Request failed");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.to_app_error()
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AuthError::Timeout
        } else if err.is_builder() {
            AuthError::InvalidRequest(err.to_string())
        } else {
            AuthError::Transport(err.to_string())
        }
    }
}

impl From<http::header::InvalidHeaderValue> for AuthError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        AuthError::InvalidRequest(err.to_string())
    }
}
