use std::time::Instant;

use crate::db::{CatalogReader, FeatureStore};
use crate::error::AppResult;
use crate::services::encoder;

/// Outcome of one encoding run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSummary {
    pub total: usize,
    pub encoded: usize,
}

/// Encodes the entire catalog into the feature store.
///
/// Sequential pipeline: one batch of range statistics, then every game in
/// fixed-size chunks. Chunking only bounds the number of in-flight writes;
/// each upsert is atomic and independent. A failed upsert aborts the rest of
/// the run so a partially encoded catalog is never mistaken for a complete
/// one.
pub async fn run(
    catalog: &dyn CatalogReader,
    store: &dyn FeatureStore,
    batch_size: usize,
) -> AppResult<EncodeSummary> {
    let started = Instant::now();
    let ranges = catalog.numeric_ranges().await?;
    let games = catalog.all_games().await?;
    let total = games.len();

    tracing::info!(total, batch_size, "Starting feature encoding run");

    let mut encoded = 0usize;
    for chunk in games.chunks(batch_size.max(1)) {
        for game in chunk {
            let features = encoder::encode(game, &ranges);
            if let Err(e) = store.upsert(&features).await {
                tracing::error!(
                    steam_appid = %game.steam_appid,
                    encoded,
                    total,
                    error = %e,
                    "Feature upsert failed, aborting remaining run"
                );
                return Err(e);
            }
            encoded += 1;
        }
        tracing::info!(processed = encoded, total, "Encoded batch");
    }

    tracing::info!(
        encoded,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Feature encoding run complete"
    );

    Ok(EncodeSummary { total, encoded })
}
