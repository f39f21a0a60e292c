//! The user service: the only component that sequences the store, the
//! password hasher, the token service and the authorization policy.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use gatekeep_core::db::DatabaseError;

use super::error::ServiceError;
use crate::auth::policy::{self, Action};
use crate::auth::{Claims, CredentialHasher, DUMMY_HASH, IssuedToken, JwtManager};
use crate::storage::{CredentialStore, NewUser, User, UserChanges};

/// Input for [`UserService::register_user`]. The password is plaintext and
/// is hashed before it reaches the store.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub login: String,
    pub username: String,
    pub surname: String,
    pub email: String,
    pub password: String,
}

/// Requested profile edits; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    /// Plaintext; re-hashed before storage.
    pub password: Option<String>,
    /// Requires the admin claim regardless of target.
    pub is_admin: Option<bool>,
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<JwtManager>,
}

impl UserService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<JwtManager>,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Base64 of the public key PEM, for out-of-process verifiers.
    pub fn public_key_base64(&self) -> String {
        self.tokens.keys().public_key_base64()
    }

    /// Create an account. Login and email must both be unused.
    #[instrument(skip_all, fields(login = %registration.login))]
    pub async fn register_user(&self, registration: Registration) -> Result<User, ServiceError> {
        match self.store.get_user_by_login(&registration.login).await {
            Ok(_) => return Err(ServiceError::DuplicateLogin),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }
        match self.store.get_user_by_email(&registration.email).await {
            Ok(_) => return Err(ServiceError::DuplicateEmail),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let password_hash = self.hash(&registration.password)?;

        let user = self
            .store
            .create_user(&NewUser {
                login: registration.login,
                username: registration.username,
                surname: registration.surname,
                email: registration.email,
                password_hash,
                is_admin: false,
            })
            .await
            .map_err(ServiceError::from_create_conflict)?;

        info!(user_id = user.id, login = %user.login, "User registered");
        Ok(user)
    }

    /// Check credentials, mint a token and record it as the user's live
    /// token. Nothing is persisted unless minting succeeded.
    #[instrument(skip(self, password))]
    pub async fn authenticate_user(
        &self,
        login: &str,
        password: &str,
    ) -> Result<IssuedToken, ServiceError> {
        let user = match self.store.get_user_by_login(login).await {
            Ok(user) => user,
            Err(e) if e.is_not_found() => {
                // Pay the same KDF cost as a wrong password.
                let _ = self.hasher.verify(password, DUMMY_HASH);
                warn!(login, "Failed login attempt");
                return Err(ServiceError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        let valid = self
            .hasher
            .verify(password, &user.password_hash)
            .map_err(|e| ServiceError::Internal(format!("Password verification failed: {e}")))?;
        if !valid {
            warn!(login, "Failed login attempt");
            return Err(ServiceError::InvalidCredentials);
        }

        let issued = self
            .tokens
            .generate_token(&user.username, &user.email, &user.login, user.is_admin)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        self.store
            .save_token(user.id, &issued.token, issued.expires_at, issued.issued_at)
            .await?;

        info!(user_id = user.id, login = %user.login, expires_at = issued.expires_at, "User logged in");
        Ok(issued)
    }

    /// Apply `changes` to the account `target_login` on behalf of the bearer.
    ///
    /// Checks run in a fixed order: token validity, then authorization,
    /// then existence, so unauthenticated callers learn nothing about which
    /// logins exist.
    #[instrument(skip(self, bearer_token, changes))]
    pub async fn update_user_by_login(
        &self,
        target_login: &str,
        bearer_token: &str,
        changes: ProfileChanges,
    ) -> Result<User, ServiceError> {
        let claims = self.verify_bearer(bearer_token)?;
        Self::authorize(&claims, Action::Update, target_login)?;
        if changes.is_admin.is_some() {
            Self::authorize(&claims, Action::GrantAdmin, target_login)?;
        }

        let user = self.lookup_target(target_login).await?;

        if let Some(email) = changes.email.as_deref() {
            if email != user.email {
                self.ensure_email_free(email, user.id).await?;
            }
        }

        let password_hash = changes
            .password
            .as_deref()
            .map(|password| self.hash(password))
            .transpose()?;

        let changes = UserChanges {
            username: changes.username,
            surname: changes.surname,
            email: changes.email,
            password_hash,
            is_admin: changes.is_admin,
        };
        if changes.is_empty() {
            return Ok(user);
        }

        let updated = self
            .store
            .update_user_by_id(user.id, &changes)
            .await
            .map_err(|e| match e {
                DatabaseError::NotFound(_) => ServiceError::UserNotFound,
                other => ServiceError::from_create_conflict(other),
            })?;

        info!(user_id = updated.id, target = target_login, by = %claims.login, "User updated");
        Ok(updated)
    }

    /// Delete the account `target_login`. Requires the admin claim, even for
    /// one's own account. The token record is removed with the user.
    #[instrument(skip(self, bearer_token))]
    pub async fn delete_user_by_login(
        &self,
        target_login: &str,
        bearer_token: &str,
    ) -> Result<(), ServiceError> {
        let claims = self.verify_bearer(bearer_token)?;
        Self::authorize(&claims, Action::Delete, target_login)?;

        let user = self.lookup_target(target_login).await?;

        if !self.store.delete_user_by_login(target_login).await? {
            return Err(ServiceError::UserNotFound);
        }

        info!(user_id = user.id, target = target_login, by = %claims.login, "User deleted");
        Ok(())
    }

    fn verify_bearer(&self, bearer_token: &str) -> Result<Claims, ServiceError> {
        self.tokens.validate_token(bearer_token).map_err(|e| {
            warn!(error = %e, "Rejected bearer token");
            ServiceError::TokenInvalid(e)
        })
    }

    fn authorize(claims: &Claims, action: Action, target_login: &str) -> Result<(), ServiceError> {
        policy::authorize(claims, action, target_login).map_err(|e| {
            warn!(caller = %claims.login, %action, target = target_login, "Authorization denied");
            ServiceError::NotAuthorized(e)
        })
    }

    async fn lookup_target(&self, login: &str) -> Result<User, ServiceError> {
        self.store.get_user_by_login(login).await.map_err(|e| {
            if e.is_not_found() {
                ServiceError::UserNotFound
            } else {
                ServiceError::Store(e)
            }
        })
    }

    async fn ensure_email_free(&self, email: &str, owner_id: i64) -> Result<(), ServiceError> {
        match self.store.get_user_by_email(email).await {
            Ok(existing) if existing.id != owner_id => Err(ServiceError::DuplicateEmail),
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn hash(&self, password: &str) -> Result<String, ServiceError> {
        self.hasher
            .hash(password)
            .map_err(|e| ServiceError::Internal(format!("Password hashing failed: {e}")))
    }
}
