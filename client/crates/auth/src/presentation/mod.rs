//! Presentation Layer
//!
//! The outward face of the core: the Request Gateway with its hooks, and
//! the typed endpoint wrappers built on it.

pub mod api;
pub mod dto;
pub mod gateway;
pub mod hooks;

pub use api::{AcademicApi, AuthApi};
pub use gateway::RequestGateway;
pub use hooks::{
    AttachCredential, ForceLogoutOnUnauthorized, InboundHook, OutboundHook, RequestContext,
    TagRequestId,
};
