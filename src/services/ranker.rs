use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Game, Recommendation, UserProfile};
use crate::services::similarity;

/// Policy knobs for one ranking run. Defaults mirror the reference
/// deployment; see [`crate::config::Config`] for the environment overrides.
#[derive(Debug, Clone, Copy)]
pub struct RankingPolicy {
    /// Number of recommendations returned
    pub top_k: usize,
    /// Prefix of the candidate set sampled when every score collapses
    pub last_resort_pool: usize,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            top_k: 5,
            last_resort_pool: 50,
        }
    }
}

/// Scores every candidate against the profile and returns the top-k.
///
/// Per candidate: primary similarity, then the fallback estimator when the
/// primary is exactly 0, then a bare random draw if even the fallback is
/// degenerate. Results sort descending by score with ties keeping candidate
/// input order. When the whole set collapses to zero the last-resort path
/// guarantees the caller still receives k results.
pub fn rank(
    profile: &UserProfile,
    candidates: &[Game],
    policy: &RankingPolicy,
    rng: &mut impl Rng,
) -> Vec<Recommendation> {
    let mut scored: Vec<Recommendation> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let mut similarity_score = similarity::score(profile, candidate);
        if similarity_score.is_nan() {
            similarity_score = 0.0;
        }

        if similarity_score == 0.0 {
            similarity_score = similarity::fallback_score(profile, candidate, rng);
            if similarity_score.is_nan() {
                similarity_score = rng.gen_range(0.1..0.3);
            }
        }

        let similarity_score = similarity_score.clamp(0.0, 1.0);
        scored.push(Recommendation::new(candidate, similarity_score));
    }

    // Defensive filter; the coercions above should already have removed NaN
    scored.retain(|rec| !rec.similarity_score.is_nan());

    // Stable sort, so equal scores keep candidate input order
    scored.sort_by(|a, b| {
        b.similarity_score
            .partial_cmp(&a.similarity_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    scored.truncate(policy.top_k);
    let mut top = scored;

    if top.is_empty() || top.iter().all(|rec| rec.similarity_score == 0.0) {
        tracing::warn!(
            candidates = candidates.len(),
            "All similarities collapsed to zero, using last-resort selection"
        );
        top = last_resort(candidates, policy, rng);
    }

    top
}

/// Availability over fidelity: shuffle a bounded prefix of the candidates and
/// hand each pick a uniform score from [0.1, 0.5).
fn last_resort(
    candidates: &[Game],
    policy: &RankingPolicy,
    rng: &mut impl Rng,
) -> Vec<Recommendation> {
    let mut pool: Vec<&Game> = candidates
        .iter()
        .take(policy.last_resort_pool)
        .collect();
    pool.shuffle(rng);

    pool.into_iter()
        .take(policy.top_k)
        .map(|game| Recommendation::new(game, rng.gen_range(0.1..0.5)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn profile(genres: &[&str]) -> UserProfile {
        UserProfile {
            genres: genres.iter().map(|g| g.to_string()).collect(),
            categories: Vec::new(),
            platforms: Vec::new(),
            mean_review_score: 0.0,
            mean_price: 0.0,
            seed_count: 3,
        }
    }

    fn candidate(appid: &str, genres: &[&str]) -> Game {
        let mut game = Game::new(appid, format!("game {appid}"));
        game.genres = genres.iter().map(|g| g.to_string()).collect();
        game
    }

    #[test]
    fn test_ranks_descending_and_truncates() {
        let profile = profile(&["Action", "RPG", "Puzzle"]);
        let candidates = vec![
            candidate("1", &["Puzzle"]),
            candidate("2", &["Action", "RPG", "Puzzle"]),
            candidate("3", &["Action", "RPG"]),
            candidate("4", &["Sports"]),
        ];
        let policy = RankingPolicy {
            top_k: 2,
            last_resort_pool: 50,
        };

        let mut rng = StdRng::seed_from_u64(1);
        let ranked = rank(&profile, &candidates, &policy, &mut rng);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].steam_appid, "2");
        assert_eq!(ranked[1].steam_appid, "3");
        assert!(ranked[0].similarity_score >= ranked[1].similarity_score);
    }

    #[test]
    fn test_ties_keep_candidate_input_order() {
        let profile = profile(&["Action"]);
        let candidates = vec![
            candidate("a", &["Action"]),
            candidate("b", &["Action"]),
            candidate("c", &["Action"]),
        ];

        let mut rng = StdRng::seed_from_u64(2);
        let ranked = rank(&profile, &candidates, &RankingPolicy::default(), &mut rng);

        let order: Vec<&str> = ranked.iter().map(|r| r.steam_appid.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_scores_are_bounded() {
        let profile = profile(&["Action"]);
        let candidates: Vec<Game> = (0..20)
            .map(|i| candidate(&i.to_string(), &[]))
            .collect();

        let mut rng = StdRng::seed_from_u64(3);
        let ranked = rank(&profile, &candidates, &RankingPolicy::default(), &mut rng);

        assert_eq!(ranked.len(), 5);
        for rec in &ranked {
            assert!((0.0..=1.0).contains(&rec.similarity_score));
            assert!(!rec.similarity_score.is_nan());
        }
    }

    #[test]
    fn test_empty_candidate_set_yields_no_results() {
        let profile = profile(&["Action"]);
        let mut rng = StdRng::seed_from_u64(4);
        let ranked = rank(&profile, &[], &RankingPolicy::default(), &mut rng);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_ranking_is_idempotent_with_fixed_seed() {
        let profile = profile(&["Horror"]);
        let candidates: Vec<Game> = (0..30)
            .map(|i| candidate(&i.to_string(), &[]))
            .collect();

        let mut first_rng = StdRng::seed_from_u64(5);
        let mut second_rng = StdRng::seed_from_u64(5);
        let first = rank(&profile, &candidates, &RankingPolicy::default(), &mut first_rng);
        let second = rank(&profile, &candidates, &RankingPolicy::default(), &mut second_rng);

        assert_eq!(first, second);
    }

    #[test]
    fn test_last_resort_returns_k_bounded_scores() {
        let candidates: Vec<Game> = (0..60)
            .map(|i| candidate(&i.to_string(), &[]))
            .collect();
        let policy = RankingPolicy::default();

        let mut rng = StdRng::seed_from_u64(6);
        let picks = last_resort(&candidates, &policy, &mut rng);

        assert_eq!(picks.len(), 5);
        for rec in &picks {
            assert!((0.1..0.5).contains(&rec.similarity_score));
        }
        // Pool is capped at the first 50 candidates
        assert!(picks
            .iter()
            .all(|rec| rec.steam_appid.parse::<usize>().unwrap() < 50));
    }
}
