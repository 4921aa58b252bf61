use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::models::{Game, NumericRanges};

/// Shared column list so every query hands back the same `Game` shape.
/// Tag arrays coalesce to empty lists and numerics cast to float8 at the
/// query boundary.
const GAME_COLUMNS: &str = r#"
    steam_appid,
    name,
    COALESCE(genres, '{}') AS genres,
    COALESCE(categories, '{}') AS categories,
    COALESCE(platforms, '{}') AS platforms,
    review_score::float8 AS review_score,
    metacritic::float8 AS metacritic,
    price_initial_usd::float8 AS price_initial_usd,
    required_age::float8 AS required_age,
    n_achievements::float8 AS n_achievements,
    positive_percentual::float8 AS positive_ratio
"#;

/// Read access to the game catalog
///
/// Lookups carry no ordering guarantee toward the caller and may return fewer
/// rows than names requested when a name has no catalog match.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Fetch catalog rows whose name exactly matches one of the given names
    async fn games_by_names(&self, names: &[String]) -> AppResult<Vec<Game>>;

    /// Fetch up to `limit` candidate rows, excluding the given names
    async fn candidates_excluding(&self, names: &[String], limit: i64) -> AppResult<Vec<Game>>;

    /// Fetch the entire catalog in stable identifier order
    async fn all_games(&self) -> AppResult<Vec<Game>>;

    /// Population min/max per numeric attribute, calibrated over rows with
    /// complete core quality signals (non-null review score and metacritic)
    async fn numeric_ranges(&self) -> AppResult<NumericRanges>;
}

/// Postgres-backed catalog reader over an injected connection pool
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogReader for PgCatalog {
    async fn games_by_names(&self, names: &[String]) -> AppResult<Vec<Game>> {
        let query = format!("SELECT {GAME_COLUMNS} FROM released_games WHERE name = ANY($1)");
        let games = sqlx::query_as::<_, Game>(&query)
            .bind(names)
            .fetch_all(&self.pool)
            .await?;
        Ok(games)
    }

    async fn candidates_excluding(&self, names: &[String], limit: i64) -> AppResult<Vec<Game>> {
        let query = format!(
            "SELECT {GAME_COLUMNS} FROM released_games \
             WHERE NOT (name = ANY($1)) ORDER BY steam_appid LIMIT $2"
        );
        let games = sqlx::query_as::<_, Game>(&query)
            .bind(names)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(games)
    }

    async fn all_games(&self) -> AppResult<Vec<Game>> {
        let query = format!("SELECT {GAME_COLUMNS} FROM released_games ORDER BY steam_appid");
        let games = sqlx::query_as::<_, Game>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(games)
    }

    async fn numeric_ranges(&self) -> AppResult<NumericRanges> {
        let ranges = sqlx::query_as::<_, NumericRanges>(
            r#"
            SELECT
                COALESCE(MIN(review_score)::float8, 0)       AS min_review,
                COALESCE(MAX(review_score)::float8, 0)       AS max_review,
                COALESCE(MIN(metacritic)::float8, 0)         AS min_metacritic,
                COALESCE(MAX(metacritic)::float8, 0)         AS max_metacritic,
                COALESCE(MIN(price_initial_usd)::float8, 0)  AS min_price,
                COALESCE(MAX(price_initial_usd)::float8, 0)  AS max_price,
                COALESCE(MIN(required_age)::float8, 0)       AS min_age,
                COALESCE(MAX(required_age)::float8, 0)       AS max_age,
                COALESCE(MIN(n_achievements)::float8, 0)     AS min_achievements,
                COALESCE(MAX(n_achievements)::float8, 0)     AS max_achievements,
                COALESCE(MIN(positive_percentual)::float8, 0) AS min_positive,
                COALESCE(MAX(positive_percentual)::float8, 0) AS max_positive
            FROM released_games
            WHERE review_score IS NOT NULL AND metacritic IS NOT NULL
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(ranges)
    }
}
