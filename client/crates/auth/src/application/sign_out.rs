//! Sign Out Use Case
//!
//! User-initiated logout. Local only; the server keeps no session to revoke.

use std::sync::Arc;

use crate::application::session_manager::SessionManager;
use crate::domain::repository::CredentialStore;
use crate::domain::view::{Navigator, View};

/// Sign out use case
pub struct SignOutUseCase<C>
where
    C: CredentialStore,
{
    sessions: Arc<SessionManager<C>>,
    navigator: Arc<dyn Navigator>,
}

impl<C> SignOutUseCase<C>
where
    C: CredentialStore,
{
    pub fn new(sessions: Arc<SessionManager<C>>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            sessions,
            navigator,
        }
    }

    /// End the session and show the login view; returns whether a session ended
    pub fn execute(&self) -> bool {
        let ended = self.sessions.logout();
        self.navigator.navigate(View::Login);
        ended
    }
}
