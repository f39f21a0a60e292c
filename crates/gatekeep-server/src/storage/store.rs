//! The credential store contract consumed by the user service.

use async_trait::async_trait;

use gatekeep_core::db::DatabaseError;

use super::db::Database;
use super::models::{NewUser, TokenRecord, User, UserChanges};

/// Persistence operations the user service needs.
///
/// Lookups report an absent row as [`DatabaseError::NotFound`] so callers
/// can tell "no such user" apart from infrastructure failures. No method
/// retries internally.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn create_user(&self, user: &NewUser) -> Result<User, DatabaseError>;

    async fn get_user_by_login(&self, login: &str) -> Result<User, DatabaseError>;

    async fn get_user_by_id(&self, id: i64) -> Result<User, DatabaseError>;

    async fn get_user_by_email(&self, email: &str) -> Result<User, DatabaseError>;

    async fn update_user_by_login(
        &self,
        login: &str,
        changes: &UserChanges,
    ) -> Result<User, DatabaseError>;

    async fn update_user_by_id(&self, id: i64, changes: &UserChanges)
    -> Result<User, DatabaseError>;

    /// Returns `false` when no row matched.
    async fn delete_user_by_login(&self, login: &str) -> Result<bool, DatabaseError>;

    /// Upsert keyed by `user_id`: the last call wins.
    async fn save_token(
        &self,
        user_id: i64,
        access_token: &str,
        expires_at: i64,
        issued_at: i64,
    ) -> Result<TokenRecord, DatabaseError>;

    async fn get_token_for_user(&self, user_id: i64)
    -> Result<Option<TokenRecord>, DatabaseError>;

    /// Returns `false` when no row matched.
    async fn set_admin(&self, login: &str, is_admin: bool) -> Result<bool, DatabaseError>;
}

#[async_trait]
impl CredentialStore for Database {
    async fn create_user(&self, user: &NewUser) -> Result<User, DatabaseError> {
        Self::create_user(self, user).await
    }

    async fn get_user_by_login(&self, login: &str) -> Result<User, DatabaseError> {
        Self::get_user_by_login(self, login).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<User, DatabaseError> {
        self.get_user(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, DatabaseError> {
        Self::get_user_by_email(self, email).await
    }

    async fn update_user_by_login(
        &self,
        login: &str,
        changes: &UserChanges,
    ) -> Result<User, DatabaseError> {
        Self::update_user_by_login(self, login, changes).await
    }

    async fn update_user_by_id(
        &self,
        id: i64,
        changes: &UserChanges,
    ) -> Result<User, DatabaseError> {
        self.update_user(id, changes).await
    }

    async fn delete_user_by_login(&self, login: &str) -> Result<bool, DatabaseError> {
        Self::delete_user_by_login(self, login).await
    }

    async fn save_token(
        &self,
        user_id: i64,
        access_token: &str,
        expires_at: i64,
        issued_at: i64,
    ) -> Result<TokenRecord, DatabaseError> {
        Self::save_token(self, user_id, access_token, expires_at, issued_at).await
    }

    async fn get_token_for_user(
        &self,
        user_id: i64,
    ) -> Result<Option<TokenRecord>, DatabaseError> {
        Self::get_token_for_user(self, user_id).await
    }

    async fn set_admin(&self, login: &str, is_admin: bool) -> Result<bool, DatabaseError> {
        Self::set_admin(self, login, is_admin).await
    }
}
