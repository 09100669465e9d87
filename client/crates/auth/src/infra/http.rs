//! Reqwest Transport
//!
//! HTTP implementation of the transport port. Requests are resolved
//! against the configured base URL; statuses are returned as-is.

use reqwest::{Client, Url};
use std::time::{Duration, Instant};

use crate::application::config::ClientConfig;
use crate::domain::transport::{ApiRequest, ApiResponse, Transport};
use crate::error::{AuthError, AuthResult};

/// reqwest-backed transport
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> AuthResult<Self> {
        let client = platform::http::build_client(timeout)?;
        Ok(Self {
            client,
            base_url: Self::parse_base(base_url)?,
        })
    }

    pub fn from_config(config: &ClientConfig) -> AuthResult<Self> {
        Self::new(&config.api_base_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn parse_base(raw: &str) -> AuthResult<Url> {
        // A trailing slash keeps any path prefix when joining
        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{raw}/")
        };
        Url::parse(&normalized)
            .map_err(|e| AuthError::InvalidRequest(format!("invalid base URL {raw:?}: {e}")))
    }

    fn resolve(&self, path: &str) -> AuthResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AuthError::InvalidRequest(format!("invalid path {path:?}: {e}")))
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> AuthResult<ApiResponse> {
        let url = self.resolve(&request.path)?;
        let started = Instant::now();

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .headers(request.headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Request completed"
        );

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_keeps_prefix() {
        let transport =
            ReqwestTransport::new("https://records.example.edu/api", Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            transport.resolve("/students").unwrap().as_str(),
            "https://records.example.edu/api/students"
        );
        assert_eq!(
            transport.resolve("grades/me").unwrap().as_str(),
            "https://records.example.edu/api/grades/me"
        );
    }

    #[test]
    fn test_resolve_root() {
        let transport =
            ReqwestTransport::new("http://localhost:8000", Duration::from_secs(1)).unwrap();
        assert_eq!(transport.resolve("/").unwrap().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ReqwestTransport::new("not a url", Duration::from_secs(1)),
            Err(AuthError::InvalidRequest(_))
        ));
    }
}
