//! Domain Layer
//!
//! Contains entities, value objects, the access policy, and the ports the
//! other layers plug into.

pub mod account;
pub mod entity;
pub mod policy;
pub mod repository;
pub mod transport;
pub mod value_object;
pub mod view;

// Re-exports
pub use account::{
    AccountService, LoginCredentials, LoginGrant, Registration, StudentRegistration,
    TeacherRegistration,
};
pub use entity::{identity::Identity, session::Session, session::SessionPhase};
pub use policy::{Action, CapabilitySet, NavEntry, Resource};
pub use repository::{CredentialStore, SessionReset, StoredCredentials};
pub use transport::{ApiRequest, ApiResponse, Transport};
pub use value_object::{access_token::AccessToken, user_role::UserRole};
pub use view::{Navigator, View};
