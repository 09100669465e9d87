//! Session Verification
//!
//! Optional server round-trip that confirms a hydrated session.

use crate::domain::entity::identity::Identity;

/// Server's answer about the cached session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Credential accepted; carries the current identity
    Confirmed(Identity),
    /// Credential accepted; the answer carried no identity
    Accepted,
    /// Credential refused (401)
    Rejected,
    /// Server unreachable or answered unexpectedly
    Unavailable,
}

/// Confirms the cached credential with the server
#[trait_variant::make(SessionVerifier: Send)]
pub trait LocalSessionVerifier {
    async fn verify(&self) -> Verification;
}
