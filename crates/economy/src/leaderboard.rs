//! Leaderboard boards and per-user rank lookups.

use crunch_core::leaderboard::{
    assign_ranks, clamp_limit, rank_of, Category, CategoryMeta, LeaderboardEntry, MAX_LIMIT,
};
use crunch_core::types::DbId;
use crunch_db::repositories::LeaderboardRepo;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::EconomyResult;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub category: Category,
    pub meta: CategoryMeta,
    pub entries: Vec<LeaderboardEntry>,
    /// Users that qualify for this category, not the whole user base.
    pub total_players: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRank {
    pub category: Category,
    pub rank: Option<i64>,
    pub total_players: i64,
}

/// The top of one board. `limit` is clamped to `1..=500`, default 50.
pub async fn get_leaderboard(pool: &PgPool, category: Category, limit: Option<i64>) -> EconomyResult<Leaderboard> {
    let rows = LeaderboardRepo::top(pool, category, clamp_limit(limit)).await?;
    let total_players = LeaderboardRepo::count_players(pool, category).await?;
    Ok(Leaderboard {
        category,
        meta: category.meta(),
        entries: assign_ranks(rows.into_iter().map(Into::into).collect()),
        total_players,
    })
}

/// Where `user_id` sits on a board, if within the first 500 places.
pub async fn user_rank(pool: &PgPool, user_id: DbId, category: Category) -> EconomyResult<UserRank> {
    let rows = LeaderboardRepo::top(pool, category, MAX_LIMIT).await?;
    let entries = assign_ranks(rows.into_iter().map(Into::into).collect());
    let total_players = LeaderboardRepo::count_players(pool, category).await?;
    Ok(UserRank {
        category,
        rank: rank_of(&entries, user_id),
        total_players,
    })
}
