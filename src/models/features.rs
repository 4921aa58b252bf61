use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Population (min, max) statistics for every numeric catalog attribute.
///
/// Computed once per encoding run over all games with a non-null review score
/// and metacritic score. When `min == max` for an attribute, every normalized
/// value for that attribute is 0 by definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct NumericRanges {
    pub min_review: f64,
    pub max_review: f64,
    pub min_metacritic: f64,
    pub max_metacritic: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub min_age: f64,
    pub max_age: f64,
    pub min_achievements: f64,
    pub max_achievements: f64,
    pub min_positive: f64,
    pub max_positive: f64,
}

/// One encoded feature record per catalog game.
///
/// 19 genre flags, 3 platform flags, 10 category flags and 6 normalized
/// numeric fields, persisted 1:1 with the parent `released_games` row and
/// fully overwritten on every encoding run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameFeatures {
    pub steam_appid: String,
    pub name: String,

    pub genre_action: bool,
    pub genre_adventure: bool,
    pub genre_rpg: bool,
    pub genre_strategy: bool,
    pub genre_simulation: bool,
    pub genre_sports: bool,
    pub genre_racing: bool,
    pub genre_casual: bool,
    pub genre_indie: bool,
    pub genre_massively_multiplayer: bool,
    pub genre_free_to_play: bool,
    pub genre_early_access: bool,
    pub genre_mature: bool,
    pub genre_puzzle: bool,
    pub genre_shooter: bool,
    pub genre_horror: bool,
    pub genre_survival: bool,
    pub genre_open_world: bool,
    pub genre_sandbox: bool,

    pub platform_windows: bool,
    pub platform_mac: bool,
    pub platform_linux: bool,

    pub category_single_player: bool,
    pub category_multi_player: bool,
    pub category_coop: bool,
    pub category_online_pvp: bool,
    pub category_achievements: bool,
    pub category_cloud_saves: bool,
    pub category_trading_cards: bool,
    pub category_workshop: bool,
    pub category_vr_support: bool,
    pub category_controller_support: bool,

    pub normalized_review_score: f64,
    pub normalized_metacritic: f64,
    pub normalized_price: f64,
    pub normalized_required_age: f64,
    pub normalized_n_achievements: f64,
    pub normalized_positive_ratio: f64,

    /// Length-38 vector assembled in the order defined by [`VECTOR_LAYOUT`]
    pub feature_vector: Vec<f64>,
    pub encoded_at: DateTime<Utc>,
}

/// Reads one vector position out of a feature record
pub type FieldAccessor = fn(&GameFeatures) -> f64;

fn bit(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// Canonical vector layout: genres (19) → platforms (3) → categories (10) →
/// normalized numerics (6). This table is the single source of truth for
/// vector positions; any reordering invalidates every persisted vector and
/// requires a version bump of the feature store.
pub static VECTOR_LAYOUT: [(&str, FieldAccessor); 38] = [
    ("genre_action", |f| bit(f.genre_action)),
    ("genre_adventure", |f| bit(f.genre_adventure)),
    ("genre_rpg", |f| bit(f.genre_rpg)),
    ("genre_strategy", |f| bit(f.genre_strategy)),
    ("genre_simulation", |f| bit(f.genre_simulation)),
    ("genre_sports", |f| bit(f.genre_sports)),
    ("genre_racing", |f| bit(f.genre_racing)),
    ("genre_casual", |f| bit(f.genre_casual)),
    ("genre_indie", |f| bit(f.genre_indie)),
    ("genre_massively_multiplayer", |f| {
        bit(f.genre_massively_multiplayer)
    }),
    ("genre_free_to_play", |f| bit(f.genre_free_to_play)),
    ("genre_early_access", |f| bit(f.genre_early_access)),
    ("genre_mature", |f| bit(f.genre_mature)),
    ("genre_puzzle", |f| bit(f.genre_puzzle)),
    ("genre_shooter", |f| bit(f.genre_shooter)),
    ("genre_horror", |f| bit(f.genre_horror)),
    ("genre_survival", |f| bit(f.genre_survival)),
    ("genre_open_world", |f| bit(f.genre_open_world)),
    ("genre_sandbox", |f| bit(f.genre_sandbox)),
    ("platform_windows", |f| bit(f.platform_windows)),
    ("platform_mac", |f| bit(f.platform_mac)),
    ("platform_linux", |f| bit(f.platform_linux)),
    ("category_single_player", |f| bit(f.category_single_player)),
    ("category_multi_player", |f| bit(f.category_multi_player)),
    ("category_coop", |f| bit(f.category_coop)),
    ("category_online_pvp", |f| bit(f.category_online_pvp)),
    ("category_achievements", |f| bit(f.category_achievements)),
    ("category_cloud_saves", |f| bit(f.category_cloud_saves)),
    ("category_trading_cards", |f| bit(f.category_trading_cards)),
    ("category_workshop", |f| bit(f.category_workshop)),
    ("category_vr_support", |f| bit(f.category_vr_support)),
    ("category_controller_support", |f| {
        bit(f.category_controller_support)
    }),
    ("normalized_review_score", |f| f.normalized_review_score),
    ("normalized_metacritic", |f| f.normalized_metacritic),
    ("normalized_price", |f| f.normalized_price),
    ("normalized_required_age", |f| f.normalized_required_age),
    ("normalized_n_achievements", |f| f.normalized_n_achievements),
    ("normalized_positive_ratio", |f| f.normalized_positive_ratio),
];

impl GameFeatures {
    /// Assembles the ordered feature vector from the layout table.
    ///
    /// Position-for-position comparable across items: the same record always
    /// produces a bit-identical vector.
    pub fn to_vector(&self) -> Vec<f64> {
        VECTOR_LAYOUT.iter().map(|(_, get)| get(self)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_features() -> GameFeatures {
        GameFeatures {
            steam_appid: "1".to_string(),
            name: "blank".to_string(),
            genre_action: false,
            genre_adventure: false,
            genre_rpg: false,
            genre_strategy: false,
            genre_simulation: false,
            genre_sports: false,
            genre_racing: false,
            genre_casual: false,
            genre_indie: false,
            genre_massively_multiplayer: false,
            genre_free_to_play: false,
            genre_early_access: false,
            genre_mature: false,
            genre_puzzle: false,
            genre_shooter: false,
            genre_horror: false,
            genre_survival: false,
            genre_open_world: false,
            genre_sandbox: false,
            platform_windows: false,
            platform_mac: false,
            platform_linux: false,
            category_single_player: false,
            category_multi_player: false,
            category_coop: false,
            category_online_pvp: false,
            category_achievements: false,
            category_cloud_saves: false,
            category_trading_cards: false,
            category_workshop: false,
            category_vr_support: false,
            category_controller_support: false,
            normalized_review_score: 0.0,
            normalized_metacritic: 0.0,
            normalized_price: 0.0,
            normalized_required_age: 0.0,
            normalized_n_achievements: 0.0,
            normalized_positive_ratio: 0.0,
            feature_vector: Vec::new(),
            encoded_at: Utc::now(),
        }
    }

    #[test]
    fn test_layout_has_38_positions_in_contract_order() {
        assert_eq!(VECTOR_LAYOUT.len(), 38);
        assert!(VECTOR_LAYOUT[..19]
            .iter()
            .all(|(name, _)| name.starts_with("genre_")));
        assert!(VECTOR_LAYOUT[19..22]
            .iter()
            .all(|(name, _)| name.starts_with("platform_")));
        assert!(VECTOR_LAYOUT[22..32]
            .iter()
            .all(|(name, _)| name.starts_with("category_")));
        assert!(VECTOR_LAYOUT[32..]
            .iter()
            .all(|(name, _)| name.starts_with("normalized_")));
    }

    #[test]
    fn test_vector_reflects_named_fields() {
        let mut features = blank_features();
        features.genre_action = true;
        features.platform_linux = true;
        features.category_coop = true;
        features.normalized_price = 0.25;

        let vector = features.to_vector();
        assert_eq!(vector.len(), 38);
        assert_eq!(vector[0], 1.0); // genre_action
        assert_eq!(vector[21], 1.0); // platform_linux
        assert_eq!(vector[24], 1.0); // category_coop
        assert_eq!(vector[34], 0.25); // normalized_price
        assert_eq!(vector.iter().sum::<f64>(), 3.25);
    }

    #[test]
    fn test_vector_assembly_is_deterministic() {
        let mut features = blank_features();
        features.genre_rpg = true;
        features.normalized_review_score = 0.875;

        assert_eq!(features.to_vector(), features.to_vector());
    }
}
