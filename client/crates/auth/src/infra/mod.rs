//! Infrastructure Layer
//!
//! Credential persistence, HTTP transport, and navigation implementations.

pub mod credential_store;
pub mod http;
pub mod navigator;

pub use credential_store::SlotCredentialStore;
pub use self::http::ReqwestTransport;
pub use navigator::RecordingNavigator;
