//! Auth (Session & Access Control) Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session and identity entities, access policy, ports
//! - `application/` - Session manager, route guard, account use cases
//! - `infra/` - Slot credential store, reqwest transport, navigator
//! - `presentation/` - Request gateway, hooks, typed endpoints, DTOs
//!
//! ## Features
//! - Session persisted across restarts in two named slots (token + identity)
//! - Bearer credential attached to every outbound request
//! - Forced logout and redirect to login when the server answers 401
//! - Role-derived capabilities and navigation from a single policy table
//!
//! ## Security Model
//! - Tokens are opaque; logs only ever carry a short SHA-256 fingerprint
//! - Token memory is zeroized on drop; comparisons are constant-time
//! - A 401 only ends the session whose credential was rejected
//! - The client policy mirrors server checks for display; the server decides

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{ClientConfig, ConfigError};
pub use application::route_guard::{GuardDecision, RouteGuard};
pub use application::session_manager::SessionManager;
pub use error::{AuthError, AuthResult};
pub use infra::credential_store::SlotCredentialStore;
pub use infra::http::ReqwestTransport;
pub use presentation::gateway::RequestGateway;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod policy {
    pub use crate::domain::policy::*;
}
