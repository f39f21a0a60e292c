//! `Gatekeep` Core Library
//!
//! Shared functionality for `Gatekeep` components:
//! - Layered configuration (defaults, file, environment)
//! - `SQLite` pool helpers and the `define_database!` macro
//! - Tracing initialisation
//! - Common error types

pub mod config;
pub mod db;
pub mod error;
pub mod tracing_init;

pub use config::ServerConfig;
pub use error::{Error, Result};
