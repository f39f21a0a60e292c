//! Gatekeep Server
//!
//! gRPC server for registration, login and token-guarded user management.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tonic::transport::Server;
use tracing::{info, warn};

use gatekeep_core::config::load_config;
use gatekeep_core::tracing_init::{default_filter, init_tracing};
use gatekeep_core::ServerConfig;
use gatekeep_proto::v1::auth_service_server::AuthServiceServer;
use gatekeep_proto::v1::public_key_service_server::PublicKeyServiceServer;

use gatekeep_server::auth::{Argon2Hasher, JwtManager, KeyPair};
use gatekeep_server::server::{AuthServiceImpl, PublicKeyServiceImpl};
use gatekeep_server::service::UserService;
use gatekeep_server::storage::Database;

#[derive(Parser, Debug)]
#[command(name = "gatekeep-server")]
#[command(version, about = "Gatekeep server - registration, session tokens and user management")]
struct Args {
    /// JSON config file. Values here are overridden by env vars and flags.
    #[arg(long, env = "GATEKEEP_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long)]
    addr: Option<SocketAddr>,

    /// Path to SQLite database file.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// PEM file with the RSA signing key.
    #[arg(long)]
    private_key: Option<PathBuf>,

    /// PEM file with the RSA verification key.
    #[arg(long)]
    public_key: Option<PathBuf>,

    /// Token TTL in seconds.
    #[arg(long)]
    token_ttl: Option<i64>,

    /// Log level for gatekeep crates when `RUST_LOG` is unset.
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long)]
    log_json: bool,

    /// Give the admin flag to this login at startup. Repeatable.
    #[arg(long = "grant-admin", value_name = "LOGIN")]
    grant_admin: Vec<String>,
}

impl Args {
    fn apply(self, config: &mut ServerConfig) {
        if let Some(addr) = self.addr {
            config.addr = addr;
        }
        if let Some(path) = self.db_path {
            config.database_path = Some(path);
        }
        if let Some(path) = self.private_key {
            config.private_key_path = path;
        }
        if let Some(path) = self.public_key {
            config.public_key_path = path;
        }
        if let Some(ttl) = self.token_ttl {
            config.token_ttl_secs = ttl;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if self.log_json {
            config.log_json = true;
        }
        config.grant_admins.extend(self.grant_admin);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    init_tracing(
        &default_filter("gatekeep_server", &config.log_level),
        config.log_json,
    );

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.addr,
        token_ttl_secs = config.token_ttl_secs,
        "Starting gatekeep-server"
    );

    let db_path = config.resolved_database_path()?;
    info!(path = %db_path.display(), "Opening database");
    let db = Database::open(&db_path).await?;

    let keys = KeyPair::load(&config.private_key_path, &config.public_key_path)?;
    let jwt = Arc::new(JwtManager::new(keys, config.token_ttl_secs));

    for login in &config.grant_admins {
        if db.set_admin(login, true).await? {
            info!(login = %login, "Granted admin");
        } else {
            warn!(login = %login, "Cannot grant admin: no such user");
        }
    }

    // Build services
    let users = UserService::new(Arc::new(db), Arc::new(Argon2Hasher), jwt);
    let public_key = PublicKeyServiceImpl::new(users.clone());
    let auth = AuthServiceImpl::new(users);

    let (health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<AuthServiceServer<AuthServiceImpl>>()
        .await;
    health_reporter
        .set_serving::<PublicKeyServiceServer<PublicKeyServiceImpl>>()
        .await;

    info!(addr = %config.addr, "Gatekeep server starting (plaintext)");

    let grpc_router = Server::builder()
        .http2_keepalive_interval(Some(Duration::from_secs(30)))
        .http2_keepalive_timeout(Some(Duration::from_secs(10)))
        .add_service(health_service)
        .add_service(AuthServiceServer::new(auth))
        .add_service(PublicKeyServiceServer::new(public_key));

    tokio::select! {
        result = grpc_router.serve(config.addr) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("Gatekeep stopped");
    Ok(())
}
