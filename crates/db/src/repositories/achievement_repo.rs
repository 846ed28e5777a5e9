//! Repository for `achievements` and `user_achievements`.

use crunch_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::achievement::{Achievement, AchievementStatus};

const COLUMNS: &str =
    "id, key, name, description, reward_crunch_coin, reward_trickle_tokens, icon";

pub struct AchievementRepo;

impl AchievementRepo {
    /// Achievements the user has not unlocked yet, in catalogue order.
    pub async fn list_locked<'e, E>(executor: E, user_id: DbId) -> Result<Vec<Achievement>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM achievements a
             WHERE NOT EXISTS (
                SELECT 1 FROM user_achievements ua
                WHERE ua.achievement_id = a.id AND ua.user_id = $1
             )
             ORDER BY a.id"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(user_id)
            .fetch_all(executor)
            .await
    }

    /// Full catalogue with the user's unlock timestamps.
    pub async fn list_with_status(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<AchievementStatus>, sqlx::Error> {
        sqlx::query_as::<_, AchievementStatus>(
            "SELECT a.id, a.key, a.name, a.description, a.reward_crunch_coin,
                    a.reward_trickle_tokens, a.icon, ua.unlocked_at
             FROM achievements a
             LEFT JOIN user_achievements ua ON ua.achievement_id = a.id AND ua.user_id = $1
             ORDER BY a.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Record a grant. Returns `false` if it already existed.
    pub async fn grant<'e, E>(executor: E, user_id: DbId, achievement_id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "INSERT INTO user_achievements (user_id, achievement_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_user_achievements_user_achievement DO NOTHING",
        )
        .bind(user_id)
        .bind(achievement_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
