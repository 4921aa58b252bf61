use tracing_subscriber::EnvFilter;

use gamerec_api::config::Config;
use gamerec_api::db::create_pool;
use gamerec_api::routes::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let pool = create_pool(&config.database_url).await?;

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState { pool, config };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
