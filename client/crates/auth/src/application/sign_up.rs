//! Sign Up Use Case
//!
//! Registers a student or teacher account. Does not sign in.

use std::sync::Arc;

use crate::domain::account::{AccountService, Registration};
use crate::domain::view::{Navigator, View};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub registration: Registration,
    /// Must equal the registration password
    pub confirm_password: String,
}

/// Sign up use case
pub struct SignUpUseCase<A>
where
    A: AccountService,
{
    accounts: Arc<A>,
    navigator: Arc<dyn Navigator>,
}

impl<A> SignUpUseCase<A>
where
    A: AccountService + Sync,
{
    pub fn new(accounts: Arc<A>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            accounts,
            navigator,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<()> {
        let registration = input.registration;

        if registration.password() != input.confirm_password {
            return Err(AuthError::InvalidRequest(
                "Passwords do not match".to_string(),
            ));
        }

        self.accounts.register(&registration).await?;

        tracing::info!(kind = registration.kind(), "Account registered");
        self.navigator.navigate(View::Login);
        Ok(())
    }
}
