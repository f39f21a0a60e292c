//! Gatekeep Server Library
//!
//! Core functionality for the Gatekeep authentication server:
//! - SQLite storage for users and issued tokens
//! - RS256 token issuance/validation and Argon2 password hashing
//! - Claim-based authorization policy
//! - User service orchestrating registration, login, update and delete
//! - gRPC services (Auth, PublicKey)

pub mod auth;
pub mod server;
pub mod service;
pub mod storage;
