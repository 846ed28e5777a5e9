//! Player profile and username changes.

use crunch_core::error::CoreError;
use crunch_core::leaderboard::cents_to_dollars;
use crunch_core::profile::normalize_username;
use crunch_core::types::DbId;
use crunch_db::models::user::User;
use crunch_db::repositories::{UserCharacterRepo, UserRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{user_not_found, EconomyResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: DbId,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub crunch_coin: i64,
    pub trickle_tokens: i64,
    /// Lifetime real-money spend in dollars.
    pub total_spent: f64,
    pub ranking_points: i64,
    pub pity_counter: i32,
    pub guaranteed_banner: bool,
    pub weekly_free_pull: bool,
    pub total_pulls: i64,
    pub login_streak: i32,
    pub character_count: i64,
    pub total_power: i64,
}

pub async fn me(pool: &PgPool, user_id: DbId) -> EconomyResult<Profile> {
    let user = UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;
    let character_count = UserCharacterRepo::count_for_user(pool, user_id).await?;
    let total_power = UserCharacterRepo::total_power(pool, user_id).await?;

    Ok(Profile {
        id: user.id,
        username: user.username,
        display_name: user.display_name,
        crunch_coin: user.crunch_coin,
        trickle_tokens: user.trickle_tokens,
        total_spent: cents_to_dollars(user.total_spent_cents),
        ranking_points: user.ranking_points,
        pity_counter: user.pity_counter,
        guaranteed_banner: user.guaranteed_banner,
        weekly_free_pull: user.weekly_free_pull,
        total_pulls: user.total_pulls,
        login_streak: user.login_streak,
        character_count,
        total_power,
    })
}

/// Set a new username after normalising it.
///
/// A concurrent claim of the same name still fails on the unique constraint.
pub async fn update_username(pool: &PgPool, user_id: DbId, raw: &str) -> EconomyResult<User> {
    let username = normalize_username(raw)?;
    if UserRepo::username_taken(pool, &username, user_id).await? {
        tracing::debug!(user_id, %username, "Username rejected: taken");
        return Err(CoreError::Conflict("Username is already taken.".to_string()).into());
    }

    let user = UserRepo::update_username(pool, user_id, &username)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;
    tracing::info!(user_id, %username, "Username updated");
    Ok(user)
}
