use std::{net::SocketAddr, time::Duration};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    /// Base64-encoded 32-byte JWT signing secret; `None` means generate an
    /// ephemeral one at boot.
    pub jwt_secret: Option<String>,
    pub token_ttl: Duration,
    pub seed_admin_password: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("WT_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid WT_LISTEN_ADDR");
        let db_path = std::env::var("WT_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("WT_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("WT_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let static_dir = std::env::var("WT_STATIC_DIR").unwrap_or_else(|_| "dist".into());
        let jwt_secret = std::env::var("WT_JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let token_ttl_secs: u64 = std::env::var("WT_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .unwrap_or(86400);
        let seed_admin_password =
            std::env::var("WT_SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "changeme".into());
        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir,
            jwt_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
            seed_admin_password,
        }
    }
}
