//! Error types for `Gatekeep` core library.

use thiserror::Error;

/// Result type alias using `Gatekeep` Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for `Gatekeep` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
