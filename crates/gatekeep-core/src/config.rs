//! Configuration resolution for Gatekeep.
//!
//! Implements layered config resolution:
//! 1. Built-in defaults
//! 2. JSON config file (`--config` / `GATEKEEP_CONFIG`)
//! 3. Environment variables (`GATEKEEP_*`)
//! 4. CLI arguments (highest priority, applied by the binary)

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Token validity window used when nothing else is configured (5 minutes).
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 300;

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the gRPC server listens on.
    pub addr: SocketAddr,
    /// `SQLite` database file. `None` means [`default_database_path`].
    pub database_path: Option<PathBuf>,
    /// PEM file holding the RSA private (signing) key.
    pub private_key_path: PathBuf,
    /// PEM file holding the RSA public (verification) key.
    pub public_key_path: PathBuf,
    /// Lifetime of issued tokens, in seconds.
    pub token_ttl_secs: i64,
    pub log_level: String,
    pub log_json: bool,
    /// Logins that are given the admin flag at startup.
    pub grant_admins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 44044)),
            database_path: None,
            private_key_path: PathBuf::from("keys/private.pem"),
            public_key_path: PathBuf::from("keys/public.pem"),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            log_level: "info".to_string(),
            log_json: false,
            grant_admins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.token_ttl_secs <= 0 {
            return Err(Error::Config(format!(
                "token_ttl_secs must be positive, got {}",
                self.token_ttl_secs
            )));
        }
        if self.grant_admins.iter().any(String::is_empty) {
            return Err(Error::Config("grant_admins contains an empty login".into()));
        }
        Ok(())
    }

    /// Configured database path, falling back to the per-user default.
    pub fn resolved_database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => default_database_path()
                .ok_or_else(|| Error::Config("Cannot determine home directory".into())),
        }
    }
}

/// Load configuration: defaults, then the optional file, then the process
/// environment.
pub fn load_config(file: Option<&Path>) -> Result<ServerConfig> {
    let mut config = match file {
        Some(path) => load_config_file(path)?,
        None => ServerConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    Ok(config)
}

/// Default database location: `~/.gatekeep/gatekeep.db`.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".gatekeep").join("gatekeep.db"))
}

fn load_config_file(path: &Path) -> Result<ServerConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

/// Apply `GATEKEEP_*` overrides read through `lookup`.
///
/// Unparsable values are rejected rather than ignored.
pub fn apply_env_overrides<F>(config: &mut ServerConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("GATEKEEP_ADDR") {
        config.addr = parse_env("GATEKEEP_ADDR", &val)?;
    }
    if let Some(val) = lookup("GATEKEEP_DB_PATH") {
        config.database_path = Some(PathBuf::from(val));
    }
    if let Some(val) = lookup("GATEKEEP_PRIVATE_KEY") {
        config.private_key_path = PathBuf::from(val);
    }
    if let Some(val) = lookup("GATEKEEP_PUBLIC_KEY") {
        config.public_key_path = PathBuf::from(val);
    }
    if let Some(val) = lookup("GATEKEEP_TOKEN_TTL_SECS") {
        config.token_ttl_secs = parse_env("GATEKEEP_TOKEN_TTL_SECS", &val)?;
    }
    if let Some(val) = lookup("GATEKEEP_LOG_LEVEL") {
        config.log_level = val;
    }
    Ok(())
}

fn parse_env<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| Error::Config(format!("Invalid value for {key} ({value:?}): {e}")))
}
