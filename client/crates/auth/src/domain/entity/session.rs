//! Session Entity
//!
//! In-memory session state. Only the Session Manager constructs and
//! replaces it; everyone else reads snapshots.

use crate::domain::entity::identity::Identity;
use crate::domain::policy::{self, CapabilitySet};
use crate::domain::value_object::{access_token::AccessToken, user_role::UserRole};

/// Lifecycle phase derived from the session fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SessionPhase {
    /// Startup, before the credential store has been read
    Hydrating,
    /// A token is held and requests are sent authenticated
    Authenticated,
    /// No token
    Anonymous,
}

/// Session state
///
/// Invariants:
/// - `identity.is_some()` implies `token.is_some()`
/// - `is_loading` is only true before the first hydrate completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: Option<AccessToken>,
    identity: Option<Identity>,
    is_loading: bool,
}

impl Session {
    /// Initial state at process start
    pub fn hydrating() -> Self {
        Self {
            token: None,
            identity: None,
            is_loading: true,
        }
    }

    /// Signed-out state
    pub fn anonymous() -> Self {
        Self {
            token: None,
            identity: None,
            is_loading: false,
        }
    }

    /// Signed-in state
    pub fn authenticated(token: AccessToken, identity: Identity) -> Self {
        Self {
            token: Some(token),
            identity: Some(identity),
            is_loading: false,
        }
    }

    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether authenticated requests are permitted
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.identity.as_ref().map(|identity| identity.role)
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_loading {
            SessionPhase::Hydrating
        } else if self.token.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }

    /// Capabilities of the current role (empty when anonymous)
    pub fn capabilities(&self) -> CapabilitySet {
        policy::capabilities(self.role())
    }

    /// Replace the identity, keeping the token; ignored without a token
    pub(crate) fn replace_identity(&mut self, identity: Identity) -> bool {
        if self.token.is_none() {
            return false;
        }
        self.identity = Some(identity);
        true
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::hydrating()
    }
}
