use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use pinopolis::config::AppConfig;
use pinopolis::db::{self, SqliteStorage};
use pinopolis::handlers;
use pinopolis::services::store::BookingStore;
use pinopolis::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    let store = BookingStore::open(Box::new(SqliteStorage::new(conn)));

    let state = Arc::new(AppState::new(store));
    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
