use std::{net::SocketAddr, time::Duration};

use crate::auth::decode_secret_key;

/// Token lifetime: seven days from issuance.
pub const TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub jwt_secret: Vec<u8>,
    pub token_ttl: Duration,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    /// Reads the configuration from the environment.
    ///
    /// `CARTEIRA_JWT_SECRET` is required: running without a configured
    /// signing secret is refused at startup rather than silently defaulting.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("CARTEIRA_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()?;
        let db_path =
            std::env::var("CARTEIRA_DB_PATH").unwrap_or_else(|_| "./db/carteira.db".into());
        let jwt_secret = std::env::var("CARTEIRA_JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("CARTEIRA_JWT_SECRET must be set"))
            .and_then(|raw| decode_secret_key(&raw))?;
        let cors_allow = std::env::var("CARTEIRA_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("CARTEIRA_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        Ok(Self {
            listen_addr,
            db_path,
            jwt_secret,
            token_ttl: TOKEN_TTL,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}
