//! Session Manager
//!
//! Owns the in-memory session and keeps the credential store in step with it.
//!
//! ```text
//! Hydrating ──hydrate──▶ Authenticated ◀──login── Anonymous
//!     │                        │                      ▲
//!     └────────hydrate─────────┴───────logout─────────┘
//! ```
//!
//! Every operation is a single transition of a `watch` channel, so readers
//! see either the old or the new session, never a mix. Store writes happen
//! inside that transition.

use std::sync::Arc;
use tokio::sync::watch;

use crate::application::verify_session::{SessionVerifier, Verification};
use crate::domain::entity::identity::Identity;
use crate::domain::entity::session::{Session, SessionPhase};
use crate::domain::policy::CapabilitySet;
use crate::domain::repository::{CredentialStore, SessionReset};
use crate::domain::value_object::access_token::AccessToken;

/// Session state container
///
/// Share it as `Arc<SessionManager<C>>`; there is no global instance.
pub struct SessionManager<C>
where
    C: CredentialStore,
{
    store: Arc<C>,
    state: watch::Sender<Session>,
}

impl<C> SessionManager<C>
where
    C: CredentialStore,
{
    /// Create a manager in the `Hydrating` phase
    pub fn new(store: Arc<C>) -> Self {
        let (state, _) = watch::channel(Session::hydrating());
        Self { store, state }
    }

    /// Adopt the persisted session; runs once, later calls are no-ops
    ///
    /// A token whose cached identity is missing or unreadable is treated as
    /// a lost session: the store is cleared and the result is `Anonymous`.
    pub fn hydrate(&self) -> SessionPhase {
        self.state.send_if_modified(|session| {
            if !session.is_loading() {
                return false;
            }

            let stored = self.store.load();
            *session = match (stored.token, stored.identity) {
                (Some(token), Some(identity)) => {
                    tracing::info!(
                        user_id = %identity.id,
                        role = %identity.role,
                        token = %token,
                        "Session restored"
                    );
                    Session::authenticated(token, identity)
                }
                (Some(token), None) => {
                    tracing::warn!(token = %token, "Cached identity unreadable, discarding session");
                    self.clear_store();
                    Session::anonymous()
                }
                (None, identity) => {
                    if identity.is_some() {
                        tracing::debug!("Discarding cached identity without token");
                        self.clear_store();
                    }
                    Session::anonymous()
                }
            };
            true
        });
        self.phase()
    }

    /// Hydrate, then confirm the session with the server
    ///
    /// `Confirmed` refreshes the identity, `Accepted` keeps it, `Rejected`
    /// ends the session, and `Unavailable` keeps the optimistic session.
    pub async fn hydrate_verified<V>(&self, verifier: &V) -> SessionPhase
    where
        V: SessionVerifier + Sync,
    {
        self.hydrate();
        let Some(token) = self.token() else {
            return self.phase();
        };

        match verifier.verify().await {
            Verification::Confirmed(identity) => {
                // The session may have changed while the request was in flight
                if self.token().as_ref() == Some(&token) {
                    self.update_identity(identity);
                }
            }
            Verification::Accepted => {
                tracing::debug!(token = %token, "Cached session accepted by server");
            }
            Verification::Rejected => {
                if self.reset_if_current(&token) {
                    tracing::info!(token = %token, "Cached session rejected by server");
                }
            }
            Verification::Unavailable => {
                tracing::info!("Session verification unavailable, keeping cached session");
            }
        }
        self.phase()
    }

    /// Record an externally obtained credential
    ///
    /// Persistence failure is logged and otherwise ignored; the in-memory
    /// session stays authoritative for the lifetime of the process.
    pub fn login(&self, token: AccessToken, identity: Identity) {
        self.state.send_modify(|session| {
            if let Err(e) = self.store.save(&token, &identity) {
                tracing::warn!(error = %e, "Failed to persist session, keeping it in memory");
            }
            tracing::info!(
                user_id = %identity.id,
                role = %identity.role,
                token = %token,
                "Signed in"
            );
            *session = Session::authenticated(token, identity);
        });
    }

    /// End the session; returns whether there was anything to end
    ///
    /// Idempotent: a second call (or one racing a forced logout) is a no-op.
    pub fn logout(&self) -> bool {
        self.state.send_if_modified(|session| {
            let active = session.token().is_some() || session.identity().is_some();
            if !active && !session.is_loading() {
                return false;
            }

            self.clear_store();
            if let Some(identity) = session.identity() {
                tracing::info!(user_id = %identity.id, "Signed out");
            }
            *session = Session::anonymous();
            true
        })
    }

    /// Replace the identity after a profile edit, keeping the token
    ///
    /// Returns `false` when there is no session to update.
    pub fn update_identity(&self, identity: Identity) -> bool {
        self.state.send_if_modified(|session| {
            if !session.replace_identity(identity.clone()) {
                tracing::debug!("Identity update ignored without a session");
                return false;
            }
            if let Err(e) = self.store.save_identity(&identity) {
                tracing::warn!(error = %e, "Failed to persist identity update");
            }
            true
        })
    }

    /// Current session
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receive every subsequent transition
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn token(&self) -> Option<AccessToken> {
        self.state.borrow().token().cloned()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase()
    }

    /// Capabilities for the current role
    pub fn capabilities(&self) -> CapabilitySet {
        self.state.borrow().capabilities()
    }

    /// Shared credential store
    pub fn store(&self) -> &Arc<C> {
        &self.store
    }

    fn clear_store(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear credential store");
        }
    }
}

impl<C> SessionReset for SessionManager<C>
where
    C: CredentialStore,
{
    fn reset_if_current(&self, token: &AccessToken) -> bool {
        self.state.send_if_modified(|session| {
            let cleared = match self.store.clear_if_token(token) {
                Ok(cleared) => cleared,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to clear credential store");
                    false
                }
            };
            let in_memory = session.token() == Some(token);

            if !cleared && !in_memory {
                return false;
            }
            if in_memory && !cleared {
                // Store write failed earlier or slots were edited externally
                self.clear_store();
            }
            *session = Session::anonymous();
            true
        })
    }

    fn reset_unpersisted(&self) -> bool {
        self.state.send_if_modified(|session| {
            let Some(token) = session.token() else {
                return false;
            };
            if self.store.load_token().is_some() {
                // Persisted session; the anonymous request predates it
                return false;
            }

            tracing::warn!(token = %token, "Unpersisted session refused by server, signing out");
            self.clear_store();
            *session = Session::anonymous();
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::StoredCredentials;
    use crate::domain::value_object::user_role::UserRole;
    use crate::infra::credential_store::SlotCredentialStore;
    use kernel::id::UserId;
    use platform::storage::{FileStore, KeyValueStore, MemoryStore};

    fn identity() -> Identity {
        Identity::new(UserId::new(7), "t@example.edu", "Teacher Seven", UserRole::Teacher)
    }

    fn token(raw: &str) -> AccessToken {
        AccessToken::new(raw).unwrap()
    }

    fn manager() -> (Arc<MemoryStore>, SessionManager<SlotCredentialStore<MemoryStore>>) {
        let slots = Arc::new(MemoryStore::new());
        let store = Arc::new(SlotCredentialStore::new(slots.clone(), "token", "userData"));
        (slots, SessionManager::new(store))
    }

    /// Manager whose store path is a directory, so every write fails
    fn unwritable_manager() -> (tempfile::TempDir, SessionManager<SlotCredentialStore<FileStore>>) {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("blocked");
        std::fs::create_dir(&blocked).unwrap();
        let slots = Arc::new(FileStore::open(&blocked));
        let store = Arc::new(SlotCredentialStore::new(slots, "token", "userData"));
        (dir, SessionManager::new(store))
    }

    #[test]
    fn test_starts_hydrating() {
        let (_, manager) = manager();
        assert!(manager.is_loading());
        assert_eq!(manager.phase(), SessionPhase::Hydrating);
    }

    #[test]
    fn test_hydrate_empty_store() {
        let (_, manager) = manager();
        assert_eq!(manager.hydrate(), SessionPhase::Anonymous);
        assert!(!manager.is_loading());
    }

    #[test]
    fn test_login_writes_through() {
        let (_, manager) = manager();
        manager.hydrate();
        manager.login(token("abc"), identity());

        assert_eq!(manager.phase(), SessionPhase::Authenticated);
        assert_eq!(
            manager.store().load(),
            StoredCredentials {
                token: Some(token("abc")),
                identity: Some(identity()),
            }
        );
    }

    #[test]
    fn test_logout_clears_and_is_idempotent() {
        let (_, manager) = manager();
        manager.hydrate();
        manager.login(token("abc"), identity());

        assert!(manager.logout());
        let after_first = manager.snapshot();
        assert!(!manager.logout());

        assert_eq!(manager.snapshot(), after_first);
        assert_eq!(after_first.phase(), SessionPhase::Anonymous);
        assert!(manager.store().load().is_empty());
    }

    #[test]
    fn test_hydrate_restores_session_after_restart() {
        let (slots, manager) = manager();
        manager.hydrate();
        manager.login(token("abc"), identity());
        drop(manager);

        let store = Arc::new(SlotCredentialStore::new(slots, "token", "userData"));
        let restarted = SessionManager::new(store);
        assert_eq!(restarted.hydrate(), SessionPhase::Authenticated);
        assert_eq!(restarted.identity(), Some(identity()));
        assert_eq!(restarted.token(), Some(token("abc")));
    }

    #[test]
    fn test_hydrate_with_malformed_identity_self_heals() {
        let (slots, manager) = manager();
        slots.set("token", "abc").unwrap();
        slots.set("userData", "{not json").unwrap();

        assert_eq!(manager.hydrate(), SessionPhase::Anonymous);
        assert_eq!(slots.get("token").unwrap(), None);
        assert_eq!(slots.get("userData").unwrap(), None);
    }

    #[test]
    fn test_hydrate_runs_once() {
        let (slots, manager) = manager();
        manager.hydrate();
        slots.set("token", "late").unwrap();

        assert_eq!(manager.hydrate(), SessionPhase::Anonymous);
    }

    #[test]
    fn test_update_identity_keeps_token() {
        let (_, manager) = manager();
        manager.hydrate();
        manager.login(token("abc"), identity());

        let mut edited = identity();
        edited.full_name = "Dr. Seven".to_string();
        assert!(manager.update_identity(edited.clone()));

        assert_eq!(manager.identity(), Some(edited.clone()));
        assert_eq!(manager.token(), Some(token("abc")));
        assert_eq!(manager.store().load().identity, Some(edited));
    }

    #[test]
    fn test_update_identity_without_session_is_ignored() {
        let (_, manager) = manager();
        manager.hydrate();
        assert!(!manager.update_identity(identity()));
        assert!(manager.store().load().is_empty());
    }

    #[test]
    fn test_reset_ignores_stale_token() {
        let (_, manager) = manager();
        manager.hydrate();
        manager.login(token("new"), identity());

        assert!(!manager.reset_if_current(&token("old")));
        assert_eq!(manager.phase(), SessionPhase::Authenticated);

        assert!(manager.reset_if_current(&token("new")));
        assert_eq!(manager.phase(), SessionPhase::Anonymous);
        assert!(!manager.reset_if_current(&token("new")));
    }

    #[test]
    fn test_subscribers_see_whole_transitions() {
        let (_, manager) = manager();
        let mut rx = manager.subscribe();
        manager.hydrate();
        manager.login(token("abc"), identity());

        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.token(), Some(&token("abc")));
        assert_eq!(seen.identity(), Some(&identity()));
    }

    #[test]
    fn test_login_survives_failed_write() {
        let (_dir, manager) = unwritable_manager();
        manager.hydrate();
        manager.login(token("abc"), identity());

        assert_eq!(manager.phase(), SessionPhase::Authenticated);
        assert_eq!(manager.token(), Some(token("abc")));
        assert_eq!(manager.identity(), Some(identity()));
        assert!(manager.store().load().is_empty());
    }

    #[test]
    fn test_update_identity_survives_failed_write() {
        let (_dir, manager) = unwritable_manager();
        manager.hydrate();
        manager.login(token("abc"), identity());

        let mut edited = identity();
        edited.full_name = "Dr. Seven".to_string();
        assert!(manager.update_identity(edited.clone()));

        assert_eq!(manager.identity(), Some(edited));
        assert_eq!(manager.token(), Some(token("abc")));
    }

    #[test]
    fn test_logout_after_failed_write() {
        let (_dir, manager) = unwritable_manager();
        manager.hydrate();
        manager.login(token("abc"), identity());

        assert!(manager.logout());
        assert_eq!(manager.phase(), SessionPhase::Anonymous);
        assert!(!manager.logout());
    }

    #[test]
    fn test_reset_unpersisted_only_ends_memory_sessions() {
        let (_, persisted) = manager();
        persisted.hydrate();
        persisted.login(token("abc"), identity());
        assert!(!persisted.reset_unpersisted());
        assert_eq!(persisted.phase(), SessionPhase::Authenticated);

        let (_dir, unpersisted) = unwritable_manager();
        unpersisted.hydrate();
        assert!(!unpersisted.reset_unpersisted());
        unpersisted.login(token("abc"), identity());
        assert!(unpersisted.reset_unpersisted());
        assert_eq!(unpersisted.phase(), SessionPhase::Anonymous);
    }
}
