//! Gateway Hooks
//!
//! Named steps run by the [`RequestGateway`](super::gateway::RequestGateway)
//! around every request. Outbound hooks shape the request before it is sent;
//! inbound hooks observe the response before the caller sees it.

use ::http::StatusCode;
use ::http::header::{AUTHORIZATION, HeaderValue};
use std::sync::Arc;
use uuid::Uuid;

use platform::http::{REQUEST_ID_HEADER, set_bearer};

use crate::domain::repository::{CredentialStore, SessionReset};
use crate::domain::transport::{ApiRequest, ApiResponse};
use crate::domain::value_object::access_token::AccessToken;
use crate::domain::view::{Navigator, View};
use crate::error::AuthResult;

/// Per-request state shared between hooks
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    /// Credential attached to this request, captured at send time
    pub credential: Option<AccessToken>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            credential: None,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs before a request is sent
pub trait OutboundHook: Send + Sync {
    fn name(&self) -> &'static str;

    fn on_request(&self, request: &mut ApiRequest, ctx: &mut RequestContext) -> AuthResult<()>;
}

/// Runs after a response arrives, before status mapping
pub trait InboundHook: Send + Sync {
    fn name(&self) -> &'static str;

    fn on_response(&self, response: &ApiResponse, ctx: &RequestContext);
}

// ============================================================================
// Outbound
// ============================================================================

/// Attach the stored token as a bearer credential
///
/// Reads the Credential Store rather than the in-memory session, so a
/// request issued right after a logout goes out anonymous.
pub struct AttachCredential<C>
where
    C: CredentialStore,
{
    store: Arc<C>,
}

impl<C> AttachCredential<C>
where
    C: CredentialStore,
{
    pub fn new(store: Arc<C>) -> Self {
        Self { store }
    }
}

impl<C> OutboundHook for AttachCredential<C>
where
    C: CredentialStore,
{
    fn name(&self) -> &'static str {
        "attach_credential"
    }

    fn on_request(&self, request: &mut ApiRequest, ctx: &mut RequestContext) -> AuthResult<()> {
        match self.store.load_token() {
            Some(token) => {
                set_bearer(&mut request.headers, token.expose())?;
                ctx.credential = Some(token);
            }
            None => {
                request.headers.remove(AUTHORIZATION);
                ctx.credential = None;
            }
        }
        Ok(())
    }
}

/// Tag the request with a correlation id
#[derive(Debug, Clone, Copy, Default)]
pub struct TagRequestId;

impl OutboundHook for TagRequestId {
    fn name(&self) -> &'static str {
        "tag_request_id"
    }

    fn on_request(&self, request: &mut ApiRequest, ctx: &mut RequestContext) -> AuthResult<()> {
        let value = HeaderValue::from_str(&ctx.request_id.to_string())?;
        request.headers.insert(REQUEST_ID_HEADER, value);
        Ok(())
    }
}

// ============================================================================
// Inbound
// ============================================================================

/// End the session and show the login view when the server answers 401
///
/// Only the session that issued the rejected credential is ended. When
/// several in-flight requests fail with the same credential, the first one
/// ends the session and redirects; the rest find nothing to reset.
pub struct ForceLogoutOnUnauthorized {
    sessions: Arc<dyn SessionReset>,
    navigator: Arc<dyn Navigator>,
}

impl ForceLogoutOnUnauthorized {
    pub fn new(sessions: Arc<dyn SessionReset>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            sessions,
            navigator,
        }
    }
}

impl InboundHook for ForceLogoutOnUnauthorized {
    fn name(&self) -> &'static str {
        "force_logout_on_unauthorized"
    }

    fn on_response(&self, response: &ApiResponse, ctx: &RequestContext) {
        if response.status != StatusCode::UNAUTHORIZED {
            return;
        }

        match &ctx.credential {
            Some(token) => {
                if self.sessions.reset_if_current(token) {
                    tracing::warn!(
                        request_id = %ctx.request_id,
                        token = %token,
                        "Credential rejected, signing out"
                    );
                    self.navigator.navigate(View::Login);
                } else {
                    tracing::debug!(
                        request_id = %ctx.request_id,
                        token = %token,
                        "Credential already replaced, ignoring 401"
                    );
                }
            }
            None => {
                // A session kept only in memory sends nothing the server accepts
                if !self.sessions.reset_unpersisted() {
                    tracing::info!(request_id = %ctx.request_id, "Anonymous request rejected");
                }
                self.navigator.navigate(View::Login);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::credential_store::SlotCredentialStore;
    use crate::infra::navigator::RecordingNavigator;
    use crate::domain::entity::identity::Identity;
    use crate::domain::value_object::user_role::UserRole;
    use kernel::id::UserId;
    use platform::http::extract_bearer;
    use platform::storage::MemoryStore;

    fn store_with(token: Option<&str>) -> Arc<SlotCredentialStore<MemoryStore>> {
        let store = Arc::new(SlotCredentialStore::new(
            Arc::new(MemoryStore::new()),
            "token",
            "userData",
        ));
        if let Some(raw) = token {
            let identity = Identity::new(UserId::new(1), "a@example.edu", "A", UserRole::Admin);
            store.save(&AccessToken::new(raw).unwrap(), &identity).unwrap();
        }
        store
    }

    #[test]
    fn test_attach_credential_sets_bearer() {
        let hook = AttachCredential::new(store_with(Some("abc")));
        let mut request = ApiRequest::get("/students");
        let mut ctx = RequestContext::new();

        hook.on_request(&mut request, &mut ctx).unwrap();
        assert_eq!(extract_bearer(&request.headers), Some("abc"));
        assert_eq!(ctx.credential, Some(AccessToken::new("abc").unwrap()));
    }

    #[test]
    fn test_attach_credential_anonymous() {
        let hook = AttachCredential::new(store_with(None));
        let mut request = ApiRequest::get("/");
        set_bearer(&mut request.headers, "leftover").unwrap();
        let mut ctx = RequestContext::new();

        hook.on_request(&mut request, &mut ctx).unwrap();
        assert!(request.headers.get(AUTHORIZATION).is_none());
        assert!(ctx.credential.is_none());
    }

    #[test]
    fn test_tag_request_id() {
        let mut request = ApiRequest::get("/");
        let mut ctx = RequestContext::new();
        TagRequestId.on_request(&mut request, &mut ctx).unwrap();

        let header = request.headers.get(REQUEST_ID_HEADER).unwrap();
        assert_eq!(header.to_str().unwrap(), ctx.request_id.to_string());
    }

    #[test]
    fn test_force_logout_only_on_401() {
        let store = store_with(Some("abc"));
        let navigator = Arc::new(RecordingNavigator::new());
        let hook = ForceLogoutOnUnauthorized::new(store.clone(), navigator.clone());
        let ctx = RequestContext {
            request_id: Uuid::new_v4(),
            credential: Some(AccessToken::new("abc").unwrap()),
        };

        hook.on_response(&ApiResponse::new(StatusCode::FORBIDDEN, ""), &ctx);
        assert_eq!(store.load_token(), Some(AccessToken::new("abc").unwrap()));
        assert_eq!(navigator.current(), None);

        hook.on_response(&ApiResponse::new(StatusCode::UNAUTHORIZED, ""), &ctx);
        assert!(store.load().is_empty());
        assert_eq!(navigator.history(), vec![View::Login]);

        // Same credential again: nothing left to reset
        hook.on_response(&ApiResponse::new(StatusCode::UNAUTHORIZED, ""), &ctx);
        assert_eq!(navigator.visits(View::Login), 1);
    }
}
