//! Cryptographic Utilities
//!
//! The client never verifies tokens itself; hashing is only used to produce
//! log-safe fingerprints and to compare credentials without early exit.

use base64::{Engine, engine::general_purpose};
use sha2::{Digest, Sha256};

/// Number of digest bytes kept in a fingerprint
const FINGERPRINT_BYTES: usize = 9;

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Encode bytes as URL-safe base64 without padding
pub fn to_base64_url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Short, non-reversible identifier for a secret
///
/// Lets logs correlate events for the same credential without ever
/// writing the credential itself.
pub fn fingerprint(secret: &str) -> String {
    let digest = sha256(secret.as_bytes());
    to_base64_url(&digest[..FINGERPRINT_BYTES])
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
