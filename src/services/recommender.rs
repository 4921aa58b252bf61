use rand::Rng;

use crate::db::CatalogReader;
use crate::error::{AppError, AppResult};
use crate::models::{RecommendationSet, SeedGame, UserProfile};
use crate::services::ranker::{self, RankingPolicy};

/// Exactly three seed games define a profile
pub const SEED_COUNT: usize = 3;

/// Candidate pool and ranking knobs for one request
#[derive(Debug, Clone, Copy)]
pub struct RecommenderPolicy {
    pub candidate_limit: i64,
    pub ranking: RankingPolicy,
}

impl Default for RecommenderPolicy {
    fn default() -> Self {
        Self {
            candidate_limit: 100,
            ranking: RankingPolicy::default(),
        }
    }
}

/// Produces up to k ranked recommendations for three seed game names.
///
/// All three names must resolve to catalog records; otherwise a resolution
/// error carrying the found count and names is returned and no partial
/// profile is scored. Candidates are scored sequentially against the profile
/// and ranked with the stable tie-break.
pub async fn recommend(
    catalog: &dyn CatalogReader,
    seed_names: &[String],
    policy: &RecommenderPolicy,
    rng: &mut (impl Rng + Send),
) -> AppResult<RecommendationSet> {
    if seed_names.len() != SEED_COUNT {
        return Err(AppError::InvalidInput(format!(
            "Please provide exactly {SEED_COUNT} game names"
        )));
    }

    let seeds = catalog.games_by_names(seed_names).await?;
    if seeds.len() < SEED_COUNT {
        return Err(AppError::Resolution {
            requested: SEED_COUNT,
            found: seeds.into_iter().map(|game| game.name).collect(),
        });
    }

    let candidates = catalog
        .candidates_excluding(seed_names, policy.candidate_limit)
        .await?;

    tracing::info!(
        seeds = ?seed_names,
        candidates = candidates.len(),
        "Scoring recommendation candidates"
    );

    let profile = UserProfile::from_seeds(&seeds);
    let recommendations = ranker::rank(&profile, &candidates, &policy.ranking, rng);

    tracing::info!(
        returned = recommendations.len(),
        top_score = recommendations.first().map(|rec| rec.similarity_score),
        "Recommendations ranked"
    );

    Ok(RecommendationSet {
        recommendations,
        user_games: seeds.iter().map(SeedGame::from).collect(),
    })
}
