use axum::{extract::State, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::db::PgCatalog;
use crate::error::AppResult;
use crate::models::RecommendationSet;
use crate::routes::AppState;
use crate::services::ranker::RankingPolicy;
use crate::services::recommender::{self, RecommenderPolicy};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    /// Exactly three seed game names
    pub games: Vec<String>,
}

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationSet>> {
    let catalog = PgCatalog::new(state.pool.clone());
    let policy = RecommenderPolicy {
        candidate_limit: state.config.candidate_limit,
        ranking: RankingPolicy {
            top_k: state.config.top_k,
            last_resort_pool: state.config.last_resort_pool,
        },
    };

    let mut rng = StdRng::from_entropy();
    let set = recommender::recommend(&catalog, &request.games, &policy, &mut rng).await?;
    Ok(Json(set))
}
