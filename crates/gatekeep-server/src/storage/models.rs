//! Data models for Gatekeep storage.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub login: String,
    pub username: String,
    pub surname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Most recently issued token for a user. One row per user at most.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TokenRecord {
    pub id: i64,
    pub user_id: i64,
    pub access_token: String,
    /// Reserved; no flow issues refresh tokens.
    pub refresh_token: String,
    pub expires_at: i64,
    pub issued_at: i64,
}

/// Fields for a new user row. The password is already hashed.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub login: String,
    pub username: String,
    pub surname: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// Partial update of a user row; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub is_admin: Option<bool>,
}

impl UserChanges {
    pub const fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.surname.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.is_admin.is_none()
    }
}
