use serde::Serialize;

use super::Game;

/// Request-scoped aggregate of the caller's three seed games.
///
/// Holds the flattened union of their tag lists and the arithmetic mean of
/// their numeric attributes. Never persisted; lives for one recommendation
/// request only.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub genres: Vec<String>,
    pub categories: Vec<String>,
    pub platforms: Vec<String>,
    pub mean_review_score: f64,
    pub mean_price: f64,
    pub seed_count: usize,
}

impl UserProfile {
    /// Builds a profile from the resolved seed games.
    ///
    /// Missing numeric attributes count as 0 toward the mean; non-finite
    /// values are excluded entirely.
    pub fn from_seeds(seeds: &[Game]) -> Self {
        Self {
            genres: flatten_tags(seeds, |game| &game.genres),
            categories: flatten_tags(seeds, |game| &game.categories),
            platforms: flatten_tags(seeds, |game| &game.platforms),
            mean_review_score: mean_of(seeds, |game| game.review_score),
            mean_price: mean_of(seeds, |game| game.price_initial_usd),
            seed_count: seeds.len(),
        }
    }
}

fn flatten_tags(seeds: &[Game], select: impl Fn(&Game) -> &Vec<String>) -> Vec<String> {
    seeds
        .iter()
        .flat_map(|game| select(game).iter())
        .filter(|tag| !tag.trim().is_empty())
        .cloned()
        .collect()
}

fn mean_of(seeds: &[Game], select: impl Fn(&Game) -> Option<f64>) -> f64 {
    let values: Vec<f64> = seeds
        .iter()
        .map(|game| select(game).unwrap_or(0.0))
        .filter(|value| value.is_finite())
        .collect();

    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(appid: &str, genres: &[&str], review: Option<f64>, price: Option<f64>) -> Game {
        let mut game = Game::new(appid, format!("game {appid}"));
        game.genres = genres.iter().map(|g| g.to_string()).collect();
        game.review_score = review;
        game.price_initial_usd = price;
        game
    }

    #[test]
    fn test_flattens_tags_across_seeds() {
        let seeds = vec![
            seed("1", &["Action", "RPG"], Some(80.0), Some(10.0)),
            seed("2", &["Action"], Some(90.0), Some(20.0)),
            seed("3", &["Indie", ""], Some(70.0), Some(30.0)),
        ];

        let profile = UserProfile::from_seeds(&seeds);
        // Union is flattened, not deduplicated; blanks are dropped
        assert_eq!(profile.genres, vec!["Action", "RPG", "Action", "Indie"]);
        assert_eq!(profile.seed_count, 3);
    }

    #[test]
    fn test_means_treat_missing_values_as_zero() {
        let seeds = vec![
            seed("1", &[], Some(90.0), None),
            seed("2", &[], None, Some(30.0)),
            seed("3", &[], Some(60.0), Some(15.0)),
        ];

        let profile = UserProfile::from_seeds(&seeds);
        assert_eq!(profile.mean_review_score, 50.0);
        assert_eq!(profile.mean_price, 15.0);
    }

    #[test]
    fn test_empty_seed_list_yields_zero_means() {
        let profile = UserProfile::from_seeds(&[]);
        assert_eq!(profile.mean_review_score, 0.0);
        assert_eq!(profile.mean_price, 0.0);
        assert!(profile.genres.is_empty());
    }
}
