use std::sync::Arc;

use rand::RngCore;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    auth::{decode_secret_key, AuthManager},
    config::Config,
};
use wheeltrack_core::{
    portfolios::{PortfolioService, PortfolioServiceTrait},
    trades::{TradeService, TradeServiceTrait},
    users::{UserService, UserServiceTrait},
};
use wheeltrack_storage_sqlite::{
    db::{self, spawn_writer},
    portfolios::PortfolioRepository,
    trades::TradeRepository,
    users::UserRepository,
};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub portfolio_service: Arc<dyn PortfolioServiceTrait + Send + Sync>,
    pub trade_service: Arc<dyn TradeServiceTrait + Send + Sync>,
    pub auth: Arc<AuthManager>,
    pub seed_admin_password: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("WT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let user_service = Arc::new(UserService::new(user_repo));

    let portfolio_repo = Arc::new(PortfolioRepository::new(pool.clone(), writer.clone()));
    let trade_repo = Arc::new(TradeRepository::new(pool.clone(), writer.clone()));
    let portfolio_service = Arc::new(PortfolioService::new(
        portfolio_repo.clone(),
        trade_repo.clone(),
    ));
    let trade_service = Arc::new(TradeService::new(trade_repo, portfolio_repo));

    let jwt_secret = match config.jwt_secret.as_deref() {
        Some(raw) => decode_secret_key(raw)?,
        None => {
            tracing::warn!(
                "WT_JWT_SECRET is not set; using an ephemeral secret - tokens will not survive a restart"
            );
            let mut bytes = vec![0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut bytes);
            bytes
        }
    };
    let auth = Arc::new(AuthManager::new(&jwt_secret, config.token_ttl));

    Ok(Arc::new(AppState {
        user_service,
        portfolio_service,
        trade_service,
        auth,
        seed_admin_password: config.seed_admin_password.clone(),
    }))
}
