//! Database queries for the Gatekeep server.

use gatekeep_core::db::{DatabaseError, unix_timestamp};

use super::db::Database;
use super::models::{NewUser, TokenRecord, User, UserChanges};

impl Database {
    // =========================================================================
    // User queries
    // =========================================================================

    /// Create a new user. Fails with `Conflict` if login or email is taken.
    pub async fn create_user(&self, user: &NewUser) -> Result<User, DatabaseError> {
        let now = unix_timestamp();

        let result = sqlx::query(
            "INSERT INTO users (login, username, surname, email, password_hash, is_admin, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.login)
        .bind(&user.username)
        .bind(&user.surname)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_user(result.last_insert_rowid()).await
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: i64) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("User {id}")))
    }

    /// Get a user by login.
    pub async fn get_user_by_login(&self, login: &str) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE login = ?")
            .bind(login)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("User with login {login}")))
    }

    /// Get a user by email.
    pub async fn get_user_by_email(&self, email: &str) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("User with email {email}")))
    }

    /// Apply `changes` to the user with `id` and return the updated row.
    pub async fn update_user(&self, id: i64, changes: &UserChanges) -> Result<User, DatabaseError> {
        let result = sqlx::query(
            "UPDATE users SET \
                username = COALESCE(?, username), \
                surname = COALESCE(?, surname), \
                email = COALESCE(?, email), \
                password_hash = COALESCE(?, password_hash), \
                is_admin = COALESCE(?, is_admin), \
                updated_at = ? \
             WHERE id = ?",
        )
        .bind(changes.username.as_deref())
        .bind(changes.surname.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.password_hash.as_deref())
        .bind(changes.is_admin)
        .bind(unix_timestamp())
        .bind(id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("User {id}")));
        }
        self.get_user(id).await
    }

    /// Apply `changes` to the user with `login` and return the updated row.
    pub async fn update_user_by_login(
        &self,
        login: &str,
        changes: &UserChanges,
    ) -> Result<User, DatabaseError> {
        let user = self.get_user_by_login(login).await?;
        self.update_user(user.id, changes).await
    }

    /// Set or clear the admin flag. Returns `false` if no such login exists.
    pub async fn set_admin(&self, login: &str, is_admin: bool) -> Result<bool, DatabaseError> {
        let result = sqlx::query("UPDATE users SET is_admin = ?, updated_at = ? WHERE login = ?")
            .bind(is_admin)
            .bind(unix_timestamp())
            .bind(login)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a user by login. The token record goes with it (`ON DELETE
    /// CASCADE`). Returns `false` if no such login exists.
    pub async fn delete_user_by_login(&self, login: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE login = ?")
            .bind(login)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Token queries
    // =========================================================================

    /// Store the latest token for a user, replacing any previous one.
    pub async fn save_token(
        &self,
        user_id: i64,
        access_token: &str,
        expires_at: i64,
        issued_at: i64,
    ) -> Result<TokenRecord, DatabaseError> {
        sqlx::query(
            "INSERT INTO tokens (user_id, access_token, expires_at, issued_at) VALUES (?, ?, ?, ?) \
             ON CONFLICT(user_id) DO UPDATE SET \
                access_token = excluded.access_token, \
                expires_at = excluded.expires_at, \
                issued_at = excluded.issued_at",
        )
        .bind(user_id)
        .bind(access_token)
        .bind(expires_at)
        .bind(issued_at)
        .execute(self.pool())
        .await?;

        self.get_token_for_user(user_id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Token for user {user_id}")))
    }

    /// Get the token record for a user, if one was ever issued.
    pub async fn get_token_for_user(
        &self,
        user_id: i64,
    ) -> Result<Option<TokenRecord>, DatabaseError> {
        let token = sqlx::query_as::<_, TokenRecord>("SELECT * FROM tokens WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(self.pool())
            .await?;

        Ok(token)
    }
}
