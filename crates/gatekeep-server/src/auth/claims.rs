//! JWT claims structure for Gatekeep session tokens.

use serde::{Deserialize, Serialize};

/// Decoded payload of a verified token.
///
/// A snapshot of the user record at mint time: changes made to the account
/// afterwards (including the admin flag) are not visible until the holder
/// logs in again, and the token stays trusted until `exp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub email: String,
    /// Immutable account identifier; authorization decisions key off this.
    pub login: String,
    #[serde(rename = "isadmin")]
    pub is_admin: bool,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// True when these claims identify the account with `login`.
    pub fn is_for(&self, login: &str) -> bool {
        self.login == login
    }
}
