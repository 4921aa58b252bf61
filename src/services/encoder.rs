use chrono::Utc;

use crate::models::{Game, GameFeatures, NumericRanges};
use crate::services::normalizer::normalize;

/// Keyword substrings per genre field, matched case-insensitively against
/// trimmed raw tags. Classification is many-to-one: a single raw tag such as
/// "Action RPG" sets both genre_action and genre_rpg.
pub const GENRE_KEYWORDS: [(&str, &[&str]); 19] = [
    ("genre_action", &["action"]),
    ("genre_adventure", &["adventure"]),
    ("genre_rpg", &["rpg", "role-playing"]),
    ("genre_strategy", &["strategy"]),
    ("genre_simulation", &["simulation"]),
    ("genre_sports", &["sports"]),
    ("genre_racing", &["racing"]),
    ("genre_casual", &["casual"]),
    ("genre_indie", &["indie"]),
    ("genre_massively_multiplayer", &["massively multiplayer", "mmo"]),
    ("genre_free_to_play", &["free to play"]),
    ("genre_early_access", &["early access"]),
    ("genre_mature", &["mature"]),
    ("genre_puzzle", &["puzzle"]),
    ("genre_shooter", &["shooter"]),
    ("genre_horror", &["horror"]),
    ("genre_survival", &["survival"]),
    ("genre_open_world", &["open world"]),
    ("genre_sandbox", &["sandbox"]),
];

pub const PLATFORM_KEYWORDS: [(&str, &[&str]); 3] = [
    ("platform_windows", &["windows"]),
    ("platform_mac", &["mac"]),
    ("platform_linux", &["linux"]),
];

pub const CATEGORY_KEYWORDS: [(&str, &[&str]); 10] = [
    ("category_single_player", &["single"]),
    ("category_multi_player", &["multi"]),
    ("category_coop", &["co-op"]),
    ("category_online_pvp", &["pvp"]),
    ("category_achievements", &["achievement"]),
    ("category_cloud_saves", &["cloud"]),
    ("category_trading_cards", &["trading"]),
    ("category_workshop", &["workshop"]),
    ("category_vr_support", &["vr"]),
    ("category_controller_support", &["controller", "gamepad"]),
];

/// True when any raw tag contains one of the keyword substrings
fn any_tag_contains(tags: &[String], keywords: &[&str]) -> bool {
    tags.iter().any(|tag| {
        let tag = tag.trim().to_lowercase();
        keywords.iter().any(|keyword| tag.contains(keyword))
    })
}

fn field_matches(tags: &[String], table: &[(&str, &[&str])], field: &str) -> bool {
    table
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, keywords)| any_tag_contains(tags, keywords))
        .unwrap_or(false)
}

/// Encodes one catalog game into its fixed-width feature record.
///
/// Missing numeric attributes default to 0 before normalization. The vector
/// is assembled last from the layout table so that the named fields and the
/// vector can never disagree.
pub fn encode(game: &Game, ranges: &NumericRanges) -> GameFeatures {
    let genres = &game.genres;
    let platforms = &game.platforms;
    let categories = &game.categories;

    let mut features = GameFeatures {
        steam_appid: game.steam_appid.clone(),
        name: game.name.clone(),

        genre_action: field_matches(genres, &GENRE_KEYWORDS, "genre_action"),
        genre_adventure: field_matches(genres, &GENRE_KEYWORDS, "genre_adventure"),
        genre_rpg: field_matches(genres, &GENRE_KEYWORDS, "genre_rpg"),
        genre_strategy: field_matches(genres, &GENRE_KEYWORDS, "genre_strategy"),
        genre_simulation: field_matches(genres, &GENRE_KEYWORDS, "genre_simulation"),
        genre_sports: field_matches(genres, &GENRE_KEYWORDS, "genre_sports"),
        genre_racing: field_matches(genres, &GENRE_KEYWORDS, "genre_racing"),
        genre_casual: field_matches(genres, &GENRE_KEYWORDS, "genre_casual"),
        genre_indie: field_matches(genres, &GENRE_KEYWORDS, "genre_indie"),
        genre_massively_multiplayer: field_matches(genres, &GENRE_KEYWORDS, "genre_massively_multiplayer"),
        genre_free_to_play: field_matches(genres, &GENRE_KEYWORDS, "genre_free_to_play"),
        genre_early_access: field_matches(genres, &GENRE_KEYWORDS, "genre_early_access"),
        genre_mature: field_matches(genres, &GENRE_KEYWORDS, "genre_mature"),
        genre_puzzle: field_matches(genres, &GENRE_KEYWORDS, "genre_puzzle"),
        genre_shooter: field_matches(genres, &GENRE_KEYWORDS, "genre_shooter"),
        genre_horror: field_matches(genres, &GENRE_KEYWORDS, "genre_horror"),
        genre_survival: field_matches(genres, &GENRE_KEYWORDS, "genre_survival"),
        genre_open_world: field_matches(genres, &GENRE_KEYWORDS, "genre_open_world"),
        genre_sandbox: field_matches(genres, &GENRE_KEYWORDS, "genre_sandbox"),

        platform_windows: field_matches(platforms, &PLATFORM_KEYWORDS, "platform_windows"),
        platform_mac: field_matches(platforms, &PLATFORM_KEYWORDS, "platform_mac"),
        platform_linux: field_matches(platforms, &PLATFORM_KEYWORDS, "platform_linux"),

        category_single_player: field_matches(categories, &CATEGORY_KEYWORDS, "category_single_player"),
        category_multi_player: field_matches(categories, &CATEGORY_KEYWORDS, "category_multi_player"),
        category_coop: field_matches(categories, &CATEGORY_KEYWORDS, "category_coop"),
        category_online_pvp: field_matches(categories, &CATEGORY_KEYWORDS, "category_online_pvp"),
        category_achievements: field_matches(categories, &CATEGORY_KEYWORDS, "category_achievements"),
        category_cloud_saves: field_matches(categories, &CATEGORY_KEYWORDS, "category_cloud_saves"),
        category_trading_cards: field_matches(categories, &CATEGORY_KEYWORDS, "category_trading_cards"),
        category_workshop: field_matches(categories, &CATEGORY_KEYWORDS, "category_workshop"),
        category_vr_support: field_matches(categories, &CATEGORY_KEYWORDS, "category_vr_support"),
        category_controller_support: field_matches(
            categories,
            &CATEGORY_KEYWORDS,
            "category_controller_support",
        ),

        normalized_review_score: normalize(
            game.review_score.unwrap_or(0.0),
            ranges.min_review,
            ranges.max_review,
        ),
        normalized_metacritic: normalize(
            game.metacritic.unwrap_or(0.0),
            ranges.min_metacritic,
            ranges.max_metacritic,
        ),
        normalized_price: normalize(
            game.price_initial_usd.unwrap_or(0.0),
            ranges.min_price,
            ranges.max_price,
        ),
        normalized_required_age: normalize(
            game.required_age.unwrap_or(0.0),
            ranges.min_age,
            ranges.max_age,
        ),
        normalized_n_achievements: normalize(
            game.n_achievements.unwrap_or(0.0),
            ranges.min_achievements,
            ranges.max_achievements,
        ),
        normalized_positive_ratio: normalize(
            game.positive_ratio.unwrap_or(0.0),
            ranges.min_positive,
            ranges.max_positive,
        ),

        feature_vector: Vec::new(),
        encoded_at: Utc::now(),
    };

    features.feature_vector = features.to_vector();
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged_game() -> Game {
        let mut game = Game::new("730", "Counter-Strike 2");
        game.genres = vec!["Action".to_string(), "Free To Play".to_string()];
        game.platforms = vec!["Windows".to_string(), "Linux".to_string()];
        game.categories = vec![
            "Multi-player".to_string(),
            "Online PvP".to_string(),
            "Steam Achievements".to_string(),
        ];
        game.review_score = Some(80.0);
        game.metacritic = Some(81.0);
        game.price_initial_usd = Some(0.0);
        game
    }

    fn ranges() -> NumericRanges {
        NumericRanges {
            min_review: 0.0,
            max_review: 100.0,
            min_metacritic: 0.0,
            max_metacritic: 100.0,
            min_price: 0.0,
            max_price: 60.0,
            min_age: 0.0,
            max_age: 18.0,
            min_achievements: 0.0,
            max_achievements: 200.0,
            min_positive: 0.0,
            max_positive: 100.0,
        }
    }

    #[test]
    fn test_substring_classification_sets_flags() {
        let features = encode(&tagged_game(), &ranges());
        assert!(features.genre_action);
        assert!(features.genre_free_to_play);
        assert!(!features.genre_rpg);
        assert!(features.platform_windows);
        assert!(features.platform_linux);
        assert!(!features.platform_mac);
        assert!(features.category_multi_player);
        assert!(features.category_online_pvp);
        assert!(features.category_achievements);
        assert!(!features.category_coop);
    }

    #[test]
    fn test_single_tag_can_set_multiple_fields() {
        let mut game = Game::new("1", "hybrid");
        game.genres = vec!["Action RPG".to_string()];
        let features = encode(&game, &ranges());
        assert!(features.genre_action);
        assert!(features.genre_rpg);
    }

    #[test]
    fn test_coop_requires_hyphenation_and_controller_accepts_gamepad() {
        let mut game = Game::new("2", "couch");
        game.categories = vec!["Local Co-op".to_string(), "Full Gamepad".to_string()];
        let features = encode(&game, &ranges());
        assert!(features.category_coop);
        assert!(features.category_controller_support);

        game.categories = vec!["Cooperative".to_string()];
        let features = encode(&game, &ranges());
        assert!(!features.category_coop);
    }

    #[test]
    fn test_classification_ignores_case_and_whitespace() {
        let mut game = Game::new("3", "shouty");
        game.genres = vec!["  MASSIVELY MULTIPLAYER  ".to_string()];
        let features = encode(&game, &ranges());
        assert!(features.genre_massively_multiplayer);
    }

    #[test]
    fn test_missing_numerics_default_to_zero() {
        let game = Game::new("4", "bare");
        let features = encode(&game, &ranges());
        assert_eq!(features.normalized_review_score, 0.0);
        assert_eq!(features.normalized_price, 0.0);
        assert_eq!(features.normalized_positive_ratio, 0.0);
    }

    #[test]
    fn test_vector_has_38_positions_in_contract_order() {
        let features = encode(&tagged_game(), &ranges());
        assert_eq!(features.feature_vector.len(), 38);
        // genre_action is position 0, platform_windows 19, linux 21
        assert_eq!(features.feature_vector[0], 1.0);
        assert_eq!(features.feature_vector[19], 1.0);
        assert_eq!(features.feature_vector[21], 1.0);
        // normalized_review_score is position 32
        assert_eq!(features.feature_vector[32], 0.8);
    }

    #[test]
    fn test_encoding_is_positionally_stable() {
        let game = tagged_game();
        let ranges = ranges();
        let first = encode(&game, &ranges);
        let second = encode(&game, &ranges);
        assert_eq!(first.feature_vector, second.feature_vector);
    }
}
