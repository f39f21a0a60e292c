//! Gatekeep Protocol Buffers
//!
//! Generated protobuf code for the Gatekeep gRPC API.
//!
//! This crate contains:
//! - `AuthService` for registration, login and account mutation
//! - `PublicKeyService` for distributing the token verification key

#![allow(clippy::derive_partial_eq_without_eq)]

/// Gatekeep v1 API definitions.
///
/// All generated types and services are included here.
pub mod v1 {
    tonic::include_proto!("gatekeep.v1");
}

// Re-export v1 as the default API version for convenience
pub use v1::*;
