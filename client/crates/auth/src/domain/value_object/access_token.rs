//! Access Token Value Object
//!
//! Opaque bearer credential issued by the server. The client never inspects
//! its contents; it only stores, attaches, and compares it.

use platform::crypto::{constant_time_eq, fingerprint};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{AuthError, AuthResult};

/// Bearer credential
///
/// `Debug` and `Display` print a short fingerprint, never the token.
/// The buffer is wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a server-issued token; blank tokens are rejected
    pub fn new(token: impl Into<String>) -> AuthResult<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Raw token, for the `Authorization` header and persistence only
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Log-safe identifier
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.0)
    }
}

impl PartialEq for AccessToken {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
    }
}

impl Eq for AccessToken {}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken({})", self.fingerprint())
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fingerprint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_rejected() {
        assert!(matches!(AccessToken::new(""), Err(AuthError::InvalidToken)));
        assert!(matches!(AccessToken::new("   "), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_token_trimmed() {
        let token = AccessToken::new(" abc.def \n").unwrap();
        assert_eq!(token.expose(), "abc.def");
    }

    #[test]
    fn test_debug_never_prints_token() {
        let token = AccessToken::new("super-secret-token").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.starts_with("AccessToken("));
        assert_eq!(token.to_string(), token.fingerprint());
    }

    #[test]
    fn test_equality() {
        let a = AccessToken::new("abc").unwrap();
        let b = AccessToken::new("abc").unwrap();
        let c = AccessToken::new("abd").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
