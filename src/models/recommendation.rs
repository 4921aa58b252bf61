use serde::{Deserialize, Serialize};

use super::Game;

/// One ranked recommendation returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub steam_appid: String,
    pub name: String,
    /// Bounded similarity in [0, 1]
    pub similarity_score: f64,
    pub genres: Vec<String>,
    pub categories: Vec<String>,
}

impl Recommendation {
    pub fn new(game: &Game, similarity_score: f64) -> Self {
        Self {
            steam_appid: game.steam_appid.clone(),
            name: game.name.clone(),
            similarity_score,
            genres: game.genres.clone(),
            categories: game.categories.clone(),
        }
    }
}

/// Display summary of one resolved seed game, echoed back with the results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedGame {
    pub name: String,
    pub genres: Vec<String>,
    pub categories: Vec<String>,
}

impl From<&Game> for SeedGame {
    fn from(game: &Game) -> Self {
        Self {
            name: game.name.clone(),
            genres: game.genres.clone(),
            categories: game.categories.clone(),
        }
    }
}

/// Full recommendation payload: ranked candidates plus the seeds they were
/// derived from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub recommendations: Vec<Recommendation>,
    pub user_games: Vec<SeedGame>,
}
