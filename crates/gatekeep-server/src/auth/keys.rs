//! RSA key pair used to sign and verify session tokens.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jsonwebtoken::{DecodingKey, EncodingKey};
use tracing::info;

/// Errors from loading key material.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse RSA private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Failed to parse RSA public key: {0}")]
    InvalidPublicKey(String),
}

/// Signing and verification keys, immutable once loaded.
#[derive(Clone)]
pub struct KeyPair {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    public_pem: String,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_pem", &self.public_pem)
            .finish_non_exhaustive()
    }
}

impl KeyPair {
    /// Parse a PEM encoded RSA private key (PKCS#1 or PKCS#8) and public key.
    pub fn from_pem(private_pem: &str, public_pem: &str) -> Result<Self, KeyError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem.as_bytes())
            .map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem.as_bytes())
            .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            public_pem: public_pem.to_string(),
        })
    }

    /// Read both PEM files from disk.
    pub fn load(private_path: &Path, public_path: &Path) -> Result<Self, KeyError> {
        let private_pem = read_pem(private_path)?;
        let public_pem = read_pem(public_path)?;
        let keys = Self::from_pem(&private_pem, &public_pem)?;

        info!(
            private = %private_path.display(),
            public = %public_path.display(),
            "Loaded token signing key pair"
        );
        Ok(keys)
    }

    pub const fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub const fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Standard base64 of the public key PEM, as handed out to verifiers.
    pub fn public_key_base64(&self) -> String {
        STANDARD.encode(self.public_pem.as_bytes())
    }
}

fn read_pem(path: &Path) -> Result<String, KeyError> {
    std::fs::read_to_string(path).map_err(|source| KeyError::Io {
        path: path.display().to_string(),
        source,
    })
}
