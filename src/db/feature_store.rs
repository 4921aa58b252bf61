use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::models::GameFeatures;

/// Write access to the persisted feature records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeatureStore: Send + Sync {
    /// Insert or fully overwrite the feature record for one game.
    ///
    /// Idempotent on `steam_appid`; a prior record is replaced wholesale,
    /// never partially updated.
    async fn upsert(&self, features: &GameFeatures) -> AppResult<()>;
}

/// Postgres-backed feature store over an injected connection pool
#[derive(Clone)]
pub struct PgFeatureStore {
    pool: PgPool,
}

impl PgFeatureStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeatureStore for PgFeatureStore {
    async fn upsert(&self, features: &GameFeatures) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO game_features (
                steam_appid, name,
                genre_action, genre_adventure, genre_rpg, genre_strategy, genre_simulation,
                genre_sports, genre_racing, genre_casual, genre_indie, genre_massively_multiplayer,
                genre_free_to_play, genre_early_access, genre_mature, genre_puzzle, genre_shooter,
                genre_horror, genre_survival, genre_open_world, genre_sandbox,
                platform_windows, platform_mac, platform_linux,
                category_single_player, category_multi_player, category_coop, category_online_pvp,
                category_achievements, category_cloud_saves, category_trading_cards,
                category_workshop, category_vr_support, category_controller_support,
                normalized_review_score, normalized_metacritic, normalized_price,
                normalized_required_age, normalized_n_achievements, normalized_positive_ratio,
                feature_vector, encoded_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, $32,
                $33, $34, $35, $36, $37, $38, $39, $40, $41, $42
            )
            ON CONFLICT (steam_appid) DO UPDATE SET
                name = EXCLUDED.name,
                genre_action = EXCLUDED.genre_action,
                genre_adventure = EXCLUDED.genre_adventure,
                genre_rpg = EXCLUDED.genre_rpg,
                genre_strategy = EXCLUDED.genre_strategy,
                genre_simulation = EXCLUDED.genre_simulation,
                genre_sports = EXCLUDED.genre_sports,
                genre_racing = EXCLUDED.genre_racing,
                genre_casual = EXCLUDED.genre_casual,
                genre_indie = EXCLUDED.genre_indie,
                genre_massively_multiplayer = EXCLUDED.genre_massively_multiplayer,
                genre_free_to_play = EXCLUDED.genre_free_to_play,
                genre_early_access = EXCLUDED.genre_early_access,
                genre_mature = EXCLUDED.genre_mature,
                genre_puzzle = EXCLUDED.genre_puzzle,
                genre_shooter = EXCLUDED.genre_shooter,
                genre_horror = EXCLUDED.genre_horror,
                genre_survival = EXCLUDED.genre_survival,
                genre_open_world = EXCLUDED.genre_open_world,
                genre_sandbox = EXCLUDED.genre_sandbox,
                platform_windows = EXCLUDED.platform_windows,
                platform_mac = EXCLUDED.platform_mac,
                platform_linux = EXCLUDED.platform_linux,
                category_single_player = EXCLUDED.category_single_player,
                category_multi_player = EXCLUDED.category_multi_player,
                category_coop = EXCLUDED.category_coop,
                category_online_pvp = EXCLUDED.category_online_pvp,
                category_achievements = EXCLUDED.category_achievements,
                category_cloud_saves = EXCLUDED.category_cloud_saves,
                category_trading_cards = EXCLUDED.category_trading_cards,
                category_workshop = EXCLUDED.category_workshop,
                category_vr_support = EXCLUDED.category_vr_support,
                category_controller_support = EXCLUDED.category_controller_support,
                normalized_review_score = EXCLUDED.normalized_review_score,
                normalized_metacritic = EXCLUDED.normalized_metacritic,
                normalized_price = EXCLUDED.normalized_price,
                normalized_required_age = EXCLUDED.normalized_required_age,
                normalized_n_achievements = EXCLUDED.normalized_n_achievements,
                normalized_positive_ratio = EXCLUDED.normalized_positive_ratio,
                feature_vector = EXCLUDED.feature_vector,
                encoded_at = EXCLUDED.encoded_at
            "#,
        )
        .bind(&features.steam_appid)
        .bind(&features.name)
        .bind(features.genre_action)
        .bind(features.genre_adventure)
        .bind(features.genre_rpg)
        .bind(features.genre_strategy)
        .bind(features.genre_simulation)
        .bind(features.genre_sports)
        .bind(features.genre_racing)
        .bind(features.genre_casual)
        .bind(features.genre_indie)
        .bind(features.genre_massively_multiplayer)
        .bind(features.genre_free_to_play)
        .bind(features.genre_early_access)
        .bind(features.genre_mature)
        .bind(features.genre_puzzle)
        .bind(features.genre_shooter)
        .bind(features.genre_horror)
        .bind(features.genre_survival)
        .bind(features.genre_open_world)
        .bind(features.genre_sandbox)
        .bind(features.platform_windows)
        .bind(features.platform_mac)
        .bind(features.platform_linux)
        .bind(features.category_single_player)
        .bind(features.category_multi_player)
        .bind(features.category_coop)
        .bind(features.category_online_pvp)
        .bind(features.category_achievements)
        .bind(features.category_cloud_saves)
        .bind(features.category_trading_cards)
        .bind(features.category_workshop)
        .bind(features.category_vr_support)
        .bind(features.category_controller_support)
        .bind(features.normalized_review_score)
        .bind(features.normalized_metacritic)
        .bind(features.normalized_price)
        .bind(features.normalized_required_age)
        .bind(features.normalized_n_achievements)
        .bind(features.normalized_positive_ratio)
        .bind(&features.feature_vector)
        .bind(features.encoded_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
