//! Application Layer
//!
//! Session state, navigation checks, and the account use cases.

pub mod config;
pub mod route_guard;
pub mod session_manager;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod verify_session;

// Re-exports
pub use config::{ClientConfig, ConfigError};
pub use route_guard::{GuardDecision, RouteGuard};
pub use session_manager::SessionManager;
pub use sign_in::SignInUseCase;
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use verify_session::{SessionVerifier, Verification};
