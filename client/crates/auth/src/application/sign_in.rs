//! Sign In Use Case
//!
//! Exchanges credentials for a session and moves to the dashboard.

use std::sync::Arc;

use crate::application::session_manager::SessionManager;
use crate::domain::account::{AccountService, LoginCredentials};
use crate::domain::entity::identity::Identity;
use crate::domain::repository::CredentialStore;
use crate::domain::view::{Navigator, View};
use crate::error::{AuthError, AuthResult};

/// Sign in use case
pub struct SignInUseCase<A, C>
where
    A: AccountService,
    C: CredentialStore,
{
    accounts: Arc<A>,
    sessions: Arc<SessionManager<C>>,
    navigator: Arc<dyn Navigator>,
}

impl<A, C> SignInUseCase<A, C>
where
    A: AccountService + Sync,
    C: CredentialStore,
{
    pub fn new(
        accounts: Arc<A>,
        sessions: Arc<SessionManager<C>>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            accounts,
            sessions,
            navigator,
        }
    }

    /// Sign in and return the new identity
    ///
    /// On failure the session is left as it was and the server's
    /// explanation is carried in the error.
    pub async fn execute(&self, credentials: LoginCredentials) -> AuthResult<Identity> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(AuthError::InvalidRequest(
                "Email and password are required".to_string(),
            ));
        }

        let grant = self.accounts.login(&credentials).await.inspect_err(|e| {
            tracing::info!(error = %e, "Sign in failed");
        })?;

        let identity = grant.identity.clone();
        self.sessions.login(grant.token, grant.identity);
        self.navigator.navigate(View::Dashboard);
        Ok(identity)
    }
}
