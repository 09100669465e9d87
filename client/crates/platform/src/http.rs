//! HTTP header helpers
//!
//! Common functions for attaching and reading client credentials on
//! outbound requests, plus construction of the shared HTTP client.

use ::http::header::{self, HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};
use std::time::Duration;

/// Correlation header attached to every outbound request
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const BEARER_PREFIX: &str = "Bearer ";

/// Build an `Authorization: Bearer <token>` header value
///
/// The value is marked sensitive so it is redacted from `Debug` output.
pub fn bearer_value(token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut value = HeaderValue::from_str(&format!("{BEARER_PREFIX}{token}"))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Set the bearer credential on a header map, replacing any previous one
pub fn set_bearer(headers: &mut HeaderMap, token: &str) -> Result<(), InvalidHeaderValue> {
    headers.insert(header::AUTHORIZATION, bearer_value(token)?);
    Ok(())
}

/// Extract the bearer token from headers
///
/// Returns `None` when the header is missing, not UTF-8, or uses another scheme.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Build the shared HTTP client
///
/// `timeout` is the fixed upper bound for a whole request; exceeding it
/// surfaces as a timeout error to the caller.
pub fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(5)))
        .tcp_keepalive(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_extract_bearer() {
        let mut headers = HeaderMap::new();
        set_bearer(&mut headers, "abc.def.ghi").unwrap();

        assert_eq!(extract_bearer(&headers), Some("abc.def.ghi"));
        assert!(headers.get(header::AUTHORIZATION).unwrap().is_sensitive());
    }

    #[test]
    fn test_set_bearer_replaces_previous() {
        let mut headers = HeaderMap::new();
        set_bearer(&mut headers, "old").unwrap();
        set_bearer(&mut headers, "new").unwrap();

        assert_eq!(headers.get_all(header::AUTHORIZATION).iter().count(), 1);
        assert_eq!(extract_bearer(&headers), Some("new"));
    }

    #[test]
    fn test_extract_bearer_other_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert_eq!(extract_bearer(&headers), None);
    }

    #[test]
    fn test_extract_bearer_missing() {
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
    }

    #[test]
    fn test_bearer_rejects_control_chars() {
        assert!(bearer_value("bad\ntoken").is_err());
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(Duration::from_secs(10)).is_ok());
    }
}
