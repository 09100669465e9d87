//! Repository Traits
//!
//! Interfaces for credential persistence. Implementation is in infrastructure layer.

use crate::domain::entity::identity::Identity;
use crate::domain::value_object::access_token::AccessToken;
use crate::error::AuthResult;

/// What the credential store holds
///
/// Either field may be missing independently; the Session Manager decides
/// what a partial result means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredCredentials {
    pub token: Option<AccessToken>,
    pub identity: Option<Identity>,
}

impl StoredCredentials {
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.identity.is_none()
    }
}

/// Durable credential persistence
///
/// Synchronous and process-wide; share one instance behind an `Arc`.
/// Reads never fail: unreadable data is reported as absent.
pub trait CredentialStore: Send + Sync {
    /// Persist a new session
    fn save(&self, token: &AccessToken, identity: &Identity) -> AuthResult<()>;

    /// Overwrite the cached identity, leaving the token untouched
    fn save_identity(&self, identity: &Identity) -> AuthResult<()>;

    /// Read both slots
    fn load(&self) -> StoredCredentials;

    /// Read only the token slot
    fn load_token(&self) -> Option<AccessToken> {
        self.load().token
    }

    /// Remove both slots
    fn clear(&self) -> AuthResult<()>;

    /// Remove both slots only if the stored token equals `expected`
    ///
    /// Returns whether anything was removed. A newer session saved after
    /// `expected` was issued is left intact.
    fn clear_if_token(&self, expected: &AccessToken) -> AuthResult<bool>;
}

/// Target of a forced logout
///
/// Implemented by whatever owns the credential the gateway attached:
/// the Session Manager when one exists, otherwise the store itself.
pub trait SessionReset: Send + Sync {
    /// End the session if it still uses `token`; returns whether it did
    fn reset_if_current(&self, token: &AccessToken) -> bool;

    /// End a session that holds a token the store never received
    ///
    /// Called when a request went out anonymous and was refused. Returns
    /// whether a session was ended; owners without in-memory state have
    /// nothing to end.
    fn reset_unpersisted(&self) -> bool {
        false
    }
}
