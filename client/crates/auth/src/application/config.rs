//! Application Configuration
//!
//! Configuration for the session core and the request gateway.

use std::path::PathBuf;
use std::time::Duration;

/// Environment variable names read by [`ClientConfig::from_env`]
pub mod env_keys {
    pub const API_URL: &str = "ACADEMIC_API_URL";
    pub const TIMEOUT_SECS: &str = "ACADEMIC_TIMEOUT_SECS";
    pub const STORE_PATH: &str = "ACADEMIC_STORE_PATH";
    pub const VERIFY_ON_HYDRATE: &str = "ACADEMIC_VERIFY_ON_HYDRATE";
    pub const VERIFY_PATH: &str = "ACADEMIC_VERIFY_PATH";
}

/// Invalid configuration value
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Records server base URL
    pub api_base_url: String,
    /// Upper bound for a whole request
    pub request_timeout: Duration,
    /// Storage slot holding the bearer token
    pub token_slot: String,
    /// Storage slot holding the cached identity
    pub identity_slot: String,
    /// File backing the credential slots
    pub store_path: PathBuf,
    /// Confirm the cached identity with the server at startup
    pub verify_on_hydrate: bool,
    /// Authenticated endpoint probed by verified hydration
    pub verify_path: String,
    /// Page size for list endpoints
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(10),
            token_slot: "token".to_string(),
            identity_slot: "userData".to_string(),
            store_path: PathBuf::from(".academic/session.json"),
            verify_on_hydrate: false,
            verify_path: "/dashboard/stats".to_string(),
            page_size: 100,
        }
    }
}

impl ClientConfig {
    /// Create config from process environment, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(env_keys::API_URL).filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(env_keys::TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: env_keys::TIMEOUT_SECS,
                    expected: "a positive number of seconds",
                    value: raw.clone(),
                })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(path) = lookup(env_keys::STORE_PATH).filter(|v| !v.trim().is_empty()) {
            config.store_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(env_keys::VERIFY_ON_HYDRATE) {
            config.verify_on_hydrate = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: env_keys::VERIFY_ON_HYDRATE,
                        expected: "a boolean",
                        value: raw,
                    });
                }
            };
        }

        if let Some(path) = lookup(env_keys::VERIFY_PATH).filter(|v| !v.trim().is_empty()) {
            config.verify_path = path;
        }

        Ok(config)
    }

    /// Get request timeout in milliseconds
    pub fn request_timeout_ms(&self) -> u64 {
        self.request_timeout.as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_ms(), 10_000);
        assert_eq!(config.token_slot, "token");
        assert_eq!(config.identity_slot, "userData");
        assert!(!config.verify_on_hydrate);
        assert_eq!(config.verify_path, "/dashboard/stats");
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (env_keys::API_URL, "https://records.example.edu/api"),
            (env_keys::TIMEOUT_SECS, "3"),
            (env_keys::STORE_PATH, "/tmp/s.json"),
            (env_keys::VERIFY_ON_HYDRATE, "yes"),
            (env_keys::VERIFY_PATH, "/me"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://records.example.edu/api");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.store_path, PathBuf::from("/tmp/s.json"));
        assert!(config.verify_on_hydrate);
        assert_eq!(config.verify_path, "/me");
    }

    #[test]
    fn test_invalid_values() {
        assert!(ClientConfig::from_lookup(lookup(&[(env_keys::TIMEOUT_SECS, "0")])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[(env_keys::TIMEOUT_SECS, "ten")])).is_err());
        assert!(
            ClientConfig::from_lookup(lookup(&[(env_keys::VERIFY_ON_HYDRATE, "maybe")])).is_err()
        );
    }
}
