use serde::{Deserialize, Serialize};

/// A single catalog row from the `released_games` table.
///
/// Tag lists carry no uniqueness or casing guarantees from the source data;
/// duplicates and mixed case are tolerated downstream. Numeric attributes are
/// nullable in the catalog and default to 0 at the point of use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Game {
    /// Stable catalog identifier
    pub steam_appid: String,
    pub name: String,
    pub genres: Vec<String>,
    pub categories: Vec<String>,
    pub platforms: Vec<String>,
    /// Aggregate review score, 0-100 range
    pub review_score: Option<f64>,
    pub metacritic: Option<f64>,
    pub price_initial_usd: Option<f64>,
    pub required_age: Option<f64>,
    pub n_achievements: Option<f64>,
    /// Share of positive reviews, 0-100 range
    pub positive_ratio: Option<f64>,
}

impl Game {
    /// Creates a game with the given identity and empty attributes.
    /// Primarily useful for constructing test fixtures.
    pub fn new(steam_appid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            steam_appid: steam_appid.into(),
            name: name.into(),
            genres: Vec::new(),
            categories: Vec::new(),
            platforms: Vec::new(),
            review_score: None,
            metacritic: None,
            price_initial_usd: None,
            required_age: None,
            n_achievements: None,
            positive_ratio: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_has_empty_attributes() {
        let game = Game::new("620", "Portal 2");
        assert_eq!(game.steam_appid, "620");
        assert_eq!(game.name, "Portal 2");
        assert!(game.genres.is_empty());
        assert!(game.review_score.is_none());
    }
}
