//! Aggregated leaderboard queries.
//!
//! Values come back as `DOUBLE PRECISION` so every category shares one row
//! shape; spend is converted from cents to dollars in SQL.

use crunch_core::leaderboard::Category;
use sqlx::PgPool;

use crate::models::leaderboard::LeaderboardRow;

const SPENT_DOLLARS: &str = "(u.total_spent_cents::DOUBLE PRECISION / 100.0)";

pub struct LeaderboardRepo;

impl LeaderboardRepo {
    /// Top `limit` rows for a category, already ordered.
    pub async fn top(pool: &PgPool, category: Category, limit: i64) -> Result<Vec<LeaderboardRow>, sqlx::Error> {
        let query = match category {
            Category::Ranking => format!(
                "SELECT u.id AS user_id, u.display_name, u.username,
                        u.ranking_points::DOUBLE PRECISION AS value,
                        {SPENT_DOLLARS} AS secondary
                 FROM users u
                 WHERE u.ranking_points > 0
                 ORDER BY u.ranking_points DESC, u.id ASC
                 LIMIT $1"
            ),
            Category::Spending => format!(
                "SELECT u.id AS user_id, u.display_name, u.username,
                        {SPENT_DOLLARS} AS value,
                        u.ranking_points::DOUBLE PRECISION AS secondary
                 FROM users u
                 WHERE u.total_spent_cents > 0
                 ORDER BY u.total_spent_cents DESC, u.id ASC
                 LIMIT $1"
            ),
            Category::Power => format!(
                "SELECT u.id AS user_id, u.display_name, u.username,
                        SUM(c.base_power + uc.fed_power)::DOUBLE PRECISION AS value,
                        {SPENT_DOLLARS} AS secondary
                 FROM users u
                 JOIN user_characters uc ON uc.user_id = u.id
                 JOIN characters c ON c.id = uc.character_id
                 GROUP BY u.id
                 ORDER BY SUM(c.base_power + uc.fed_power) DESC, u.id ASC
                 LIMIT $1"
            ),
            Category::Collection => format!(
                "SELECT u.id AS user_id, u.display_name, u.username,
                        COUNT(uc.id)::DOUBLE PRECISION AS value,
                        {SPENT_DOLLARS} AS secondary
                 FROM users u
                 JOIN user_characters uc ON uc.user_id = u.id
                 GROUP BY u.id
                 ORDER BY COUNT(uc.id) DESC, u.id ASC
                 LIMIT $1"
            ),
        };
        sqlx::query_as::<_, LeaderboardRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Number of users that qualify for a category.
    pub async fn count_players(pool: &PgPool, category: Category) -> Result<i64, sqlx::Error> {
        let query = match category {
            Category::Ranking => "SELECT COUNT(*) FROM users WHERE ranking_points > 0",
            Category::Spending => "SELECT COUNT(*) FROM users WHERE total_spent_cents > 0",
            Category::Power | Category::Collection => {
                "SELECT COUNT(DISTINCT user_id) FROM user_characters"
            }
        };
        sqlx::query_scalar::<_, i64>(query).fetch_one(pool).await
    }
}
