//! Authentication module for Gatekeep.
//!
//! Provides the RSA key pair, JWT token management, password hashing and
//! the claim-based authorization policy.

pub mod claims;
pub mod jwt;
pub mod keys;
pub mod password;
pub mod policy;

#[cfg(test)]
pub(crate) mod test_keys;

pub use claims::Claims;
pub use jwt::{IssuedToken, JwtManager, TokenError};
pub use keys::{KeyError, KeyPair};
pub use password::{Argon2Hasher, CredentialHasher, DUMMY_HASH};
pub use policy::{Action, PolicyError};
