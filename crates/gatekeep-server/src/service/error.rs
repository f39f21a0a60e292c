//! Failure taxonomy surfaced by the user service.

use gatekeep_core::db::DatabaseError;

use crate::auth::{PolicyError, TokenError};

/// Errors returned to callers of [`super::UserService`].
///
/// `InvalidCredentials` deliberately covers both an unknown login and a
/// wrong password.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid login or password")]
    InvalidCredentials,

    #[error("Login already taken")]
    DuplicateLogin,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid token: {0}")]
    TokenInvalid(#[source] TokenError),

    #[error(transparent)]
    NotAuthorized(#[from] PolicyError),

    #[error("Store error: {0}")]
    Store(#[from] DatabaseError),

    /// Hashing or signing failed; not caused by the caller.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Map a unique-constraint conflict from the store onto the matching
    /// duplicate error; anything else stays a store error.
    pub(crate) fn from_create_conflict(err: DatabaseError) -> Self {
        if err.is_conflict_on("users.login") {
            Self::DuplicateLogin
        } else if err.is_conflict_on("users.email") {
            Self::DuplicateEmail
        } else {
            Self::Store(err)
        }
    }
}
