//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations for the client:
//! - Named-slot key/value storage (in-memory and file-backed)
//! - HTTP header helpers (bearer credentials, request correlation)
//! - HTTP client construction with a fixed request timeout
//! - Hashing utilities for log-safe token fingerprints

pub mod crypto;
pub mod http;
pub mod storage;
