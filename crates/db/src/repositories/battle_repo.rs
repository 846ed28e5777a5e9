//! Repository for the `battles` log and matchmaking queries.

use crunch_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::battle::{Battle, BattleHistoryEntry, CreateBattle, Opponent};

const COLUMNS: &str = "id, attacker_id, defender_id, winner_id, attacker_power, defender_power, \
     attacker_roll, defender_roll, ranking_points_change, buzzwords_used, created_at";

pub struct BattleRepo;

impl BattleRepo {
    pub async fn create<'e, E>(executor: E, input: &CreateBattle) -> Result<Battle, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO battles
                (attacker_id, defender_id, winner_id, attacker_power, defender_power,
                 attacker_roll, defender_roll, ranking_points_change, buzzwords_used)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Battle>(&query)
            .bind(input.attacker_id)
            .bind(input.defender_id)
            .bind(input.winner_id)
            .bind(input.attacker_power)
            .bind(input.defender_power)
            .bind(input.attacker_roll)
            .bind(input.defender_roll)
            .bind(input.ranking_points_change)
            .bind(&input.buzzwords_used)
            .fetch_one(executor)
            .await
    }

    /// Serialise battles started by one attacker until the transaction ends.
    pub async fn lock_attacker<'e, E>(executor: E, attacker_id: DbId) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(attacker_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// When `attacker_id` last started a battle.
    pub async fn last_attack_at<'e, E>(executor: E, attacker_id: DbId) -> Result<Option<Timestamp>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, Timestamp>(
            "SELECT created_at FROM battles
             WHERE attacker_id = $1
             ORDER BY created_at DESC
             LIMIT 1",
        )
        .bind(attacker_id)
        .fetch_optional(executor)
        .await
    }

    pub async fn count_wins<'e, E>(executor: E, user_id: DbId) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM battles WHERE winner_id = $1")
            .bind(user_id)
            .fetch_one(executor)
            .await
    }

    /// Most recent battles the user attacked in or defended, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<BattleHistoryEntry>, sqlx::Error> {
        sqlx::query_as::<_, BattleHistoryEntry>(
            "SELECT b.id, b.attacker_id, a.display_name AS attacker_name,
                    b.defender_id, d.display_name AS defender_name, b.winner_id,
                    b.attacker_power, b.defender_power, b.attacker_roll, b.defender_roll,
                    b.ranking_points_change, b.created_at
             FROM battles b
             JOIN users a ON a.id = b.attacker_id
             JOIN users d ON d.id = b.defender_id
             WHERE b.attacker_id = $1 OR b.defender_id = $1
             ORDER BY b.created_at DESC, b.id DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Users with at least one character whose ranking is within `range` of
    /// `ranking`, closest first.
    pub async fn find_opponents_near<'e, E>(
        executor: E,
        attacker_id: DbId,
        ranking: i64,
        range: i64,
        limit: i64,
    ) -> Result<Vec<Opponent>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Opponent>(
            "SELECT u.id, u.display_name, u.ranking_points
             FROM users u
             WHERE u.id <> $1
               AND u.ranking_points BETWEEN $2 - $3 AND $2 + $3
               AND EXISTS (SELECT 1 FROM user_characters uc WHERE uc.user_id = u.id)
             ORDER BY ABS(u.ranking_points - $2) ASC, u.id ASC
             LIMIT $4",
        )
        .bind(attacker_id)
        .bind(ranking)
        .bind(range)
        .bind(limit)
        .fetch_all(executor)
        .await
    }

    /// Fallback pool: any other user with characters, highest ranking first.
    pub async fn find_top_opponents<'e, E>(
        executor: E,
        attacker_id: DbId,
        limit: i64,
    ) -> Result<Vec<Opponent>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Opponent>(
            "SELECT u.id, u.display_name, u.ranking_points
             FROM users u
             WHERE u.id <> $1
               AND EXISTS (SELECT 1 FROM user_characters uc WHERE uc.user_id = u.id)
             ORDER BY u.ranking_points DESC, u.id ASC
             LIMIT $2",
        )
        .bind(attacker_id)
        .bind(limit)
        .fetch_all(executor)
        .await
    }
}
