//! Batch job that encodes every catalog game into the feature store.
//!
//! Run after catalog imports: computes fresh normalization statistics and
//! overwrites the complete `game_features` table.

use tracing_subscriber::EnvFilter;

use gamerec_api::config::Config;
use gamerec_api::db::{create_pool, run_migrations, PgCatalog, PgFeatureStore};
use gamerec_api::services::feature_batch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let catalog = PgCatalog::new(pool.clone());
    let store = PgFeatureStore::new(pool);

    let summary = feature_batch::run(&catalog, &store, config.encode_batch_size).await?;
    tracing::info!(
        total = summary.total,
        encoded = summary.encoded,
        "Encoding job finished"
    );

    Ok(())
}
