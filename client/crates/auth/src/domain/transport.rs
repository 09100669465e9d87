//! Transport Port
//!
//! Request/response types exchanged with the records server, and the trait
//! the Request Gateway wraps. The HTTP implementation lives in `infra`.

use http::{HeaderMap, Method, StatusCode};
use serde::Serialize;

use crate::error::{AuthError, AuthResult};

/// Outbound API request, relative to the configured base URL
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> AuthResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Raw response from the server
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Server's `detail` field, as FastAPI-style error bodies carry it
    ///
    /// A string detail is returned as-is; a list of validation errors is
    /// flattened to their `msg` fields.
    pub fn detail(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        match value.get("detail")? {
            serde_json::Value::String(detail) => Some(detail.clone()),
            serde_json::Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|msg| msg.as_str()))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        }
    }

    /// Map a non-success status to the caller-facing error
    pub fn into_result(self) -> AuthResult<ApiResponse> {
        if self.is_success() {
            return Ok(self);
        }
        Err(match self.status {
            StatusCode::UNAUTHORIZED => AuthError::Unauthorized,
            StatusCode::FORBIDDEN => AuthError::Forbidden {
                detail: self.detail(),
            },
            status => AuthError::Rejected {
                status: status.as_u16(),
                detail: self.detail(),
            },
        })
    }
}

/// Wire transport
#[trait_variant::make(Transport: Send)]
pub trait LocalTransport {
    /// Send one request; non-success statuses are returned, not raised
    async fn send(&self, request: ApiRequest) -> AuthResult<ApiResponse>;
}
