//! Claim-based authorization for account mutations.
//!
//! Decisions are a pure function of already-verified claims and the target
//! login; the store is not consulted.

use std::fmt;

use super::claims::Claims;

/// A mutation a caller wants to perform on an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Change profile fields or password.
    Update,
    /// Remove the account and its token record.
    Delete,
    /// Change the admin flag of an account.
    GrantAdmin,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Update => "update",
            Self::Delete => "delete",
            Self::GrantAdmin => "grant admin to",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("{caller} is not allowed to {action} {target}")]
    NotAuthorized {
        caller: String,
        action: Action,
        target: String,
    },
}

/// Allow or deny `action` against the account identified by `target_login`.
///
/// Admins may do anything. Non-admins may only update themselves; delete
/// and admin grants always require the admin claim.
pub fn authorize(claims: &Claims, action: Action, target_login: &str) -> Result<(), PolicyError> {
    let allowed = claims.is_admin
        || match action {
            Action::Update => claims.is_for(target_login),
            Action::Delete | Action::GrantAdmin => false,
        };

    if allowed {
        Ok(())
    } else {
        Err(PolicyError::NotAuthorized {
            caller: claims.login.clone(),
            action,
            target: target_login.to_string(),
        })
    }
}
