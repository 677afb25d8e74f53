use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use carteira_ai::ChatRelay;
use carteira_core::portfolio::{PortfolioService, PortfolioServiceTrait};
use carteira_core::users::{UserService, UserServiceTrait};
use carteira_storage_sqlite::db::{self, spawn_writer};
use carteira_storage_sqlite::positions::PositionRepository;
use carteira_storage_sqlite::users::UserRepository;

use crate::auth::AuthManager;
use crate::config::Config;

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
    pub auth: Arc<AuthManager>,
    /// `None` when no provider API key is configured; chat requests are
    /// then answered with a descriptive 500, never silently degraded.
    pub chat_relay: Option<Arc<ChatRelay>>,
}

pub fn init_tracing() {
    let log_format = std::env::var("CARTEIRA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
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
    let writer = spawn_writer(db::get_connection(&pool)?);

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let user_service = Arc::new(UserService::new(user_repo));

    let position_repo = Arc::new(PositionRepository::new(pool.clone(), writer.clone()));
    let portfolio_service = Arc::new(PortfolioService::new(position_repo));

    let auth = Arc::new(AuthManager::new(&config.jwt_secret, config.token_ttl));

    let chat_relay = ChatRelay::from_env()?.map(Arc::new);
    if chat_relay.is_none() {
        tracing::warn!("GROQ_API_KEY not configured; /api/chat will reject requests");
    }

    Ok(Arc::new(AppState {
        user_service,
        portfolio_service,
        auth,
        chat_relay,
    }))
}
