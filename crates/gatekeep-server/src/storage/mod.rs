//! `SQLite` storage for Gatekeep.
//!
//! Persists users and the single live token record per user, and exposes
//! both through the [`CredentialStore`] trait the user service depends on.

mod db;
mod models;
mod queries;
mod store;

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests;

pub use db::Database;
pub use gatekeep_core::db::DatabaseError;
pub use models::*;
pub use store::CredentialStore;
