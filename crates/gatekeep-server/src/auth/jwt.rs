//! JWT token issuance and validation.
//!
//! Tokens are signed with the RSA private key (RS256) and verified with the
//! public key, so any holder of the public key can validate them.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, Header, Validation};

use gatekeep_core::db::unix_timestamp;

use super::claims::Claims;
use super::keys::KeyPair;

/// The only algorithm tokens are signed with or accepted under.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::RS256;

/// Token failures.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Token expired")]
    Expired,

    #[error("Token verification failed: {0}")]
    Verification(String),

    #[error("Malformed token: {0}")]
    Malformed(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Utf8(_) => {
                Self::Malformed(e.to_string())
            }
            _ => Self::Verification(e.to_string()),
        }
    }
}

/// A freshly minted token and the window it is valid for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Manages JWT token creation and validation.
#[derive(Clone)]
pub struct JwtManager {
    keys: KeyPair,
    validation: Validation,
    ttl_secs: i64,
}

impl JwtManager {
    /// Create a new `JwtManager` signing with `keys`, issuing tokens valid
    /// for `ttl_secs` seconds.
    pub fn new(keys: KeyPair, ttl_secs: i64) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            keys,
            validation,
            ttl_secs,
        }
    }

    pub const fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    pub const fn keys(&self) -> &KeyPair {
        &self.keys
    }

    /// Mint a token carrying a snapshot of the given identity.
    pub fn generate_token(
        &self,
        username: &str,
        email: &str,
        login: &str,
        is_admin: bool,
    ) -> Result<IssuedToken, TokenError> {
        let now = unix_timestamp();
        let claims = Claims {
            username: username.to_string(),
            email: email.to_string(),
            login: login.to_string(),
            is_admin,
            iat: now,
            exp: now + self.ttl_secs,
        };

        let token = jsonwebtoken::encode(
            &Header::new(TOKEN_ALGORITHM),
            &claims,
            self.keys.encoding_key(),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            token,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }

    /// Verify algorithm, signature and expiry, and return the claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        let data =
            jsonwebtoken::decode::<Claims>(token, self.keys.decoding_key(), &self.validation)?;
        Ok(data.claims)
    }
}
