//! Daily login streaks.

use crunch_core::daily_login::{plan_claim, reward_for_streak, ClaimPlan};
use crunch_core::types::{DbId, Timestamp};
use crunch_db::repositories::UserRepo;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{user_not_found, EconomyResult};
use crate::events;

/// Preview of what a claim would do right now.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginStatus {
    pub can_claim: bool,
    pub current_streak: i32,
    /// Streak day and reward the next claim would give.
    pub next_streak: i32,
    pub next_reward: i64,
    pub multiplier: i32,
    pub trickle_tokens: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimOutcome {
    pub already_claimed: bool,
    pub streak: i32,
    pub reward: i64,
    pub streak_reset: bool,
    pub trickle_tokens: i64,
}

pub async fn status(pool: &PgPool, user_id: DbId, now: Timestamp) -> EconomyResult<LoginStatus> {
    let user = UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;
    let multiplier = events::token_multiplier(pool, now).await?;

    let status = match plan_claim(user.last_login_at, user.login_streak, now, multiplier) {
        ClaimPlan::AlreadyClaimed { streak } => LoginStatus {
            can_claim: false,
            current_streak: streak,
            next_streak: streak + 1,
            next_reward: reward_for_streak(streak + 1) * i64::from(multiplier.max(1)),
            multiplier,
            trickle_tokens: user.trickle_tokens,
        },
        ClaimPlan::Claim { streak, reward, .. } => LoginStatus {
            can_claim: true,
            current_streak: user.login_streak,
            next_streak: streak,
            next_reward: reward,
            multiplier,
            trickle_tokens: user.trickle_tokens,
        },
    };
    Ok(status)
}

/// Claim today's reward. A second claim on the same UTC day changes nothing.
pub async fn claim(pool: &PgPool, user_id: DbId, now: Timestamp) -> EconomyResult<ClaimOutcome> {
    let mut tx = pool.begin().await?;

    let user = UserRepo::lock(&mut *tx, user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;
    let multiplier = events::token_multiplier(&mut *tx, now).await?;

    match plan_claim(user.last_login_at, user.login_streak, now, multiplier) {
        ClaimPlan::AlreadyClaimed { streak } => {
            tracing::debug!(user_id, streak, "Daily login already claimed");
            Ok(ClaimOutcome {
                already_claimed: true,
                streak,
                reward: 0,
                streak_reset: false,
                trickle_tokens: user.trickle_tokens,
            })
        }
        ClaimPlan::Claim {
            streak,
            reward,
            streak_reset,
        } => {
            let updated = UserRepo::record_login(&mut *tx, user_id, streak, reward, now).await?;
            tx.commit().await?;

            tracing::info!(user_id, streak, reward, streak_reset, "Daily login claimed");
            Ok(ClaimOutcome {
                already_claimed: false,
                streak,
                reward,
                streak_reset,
                trickle_tokens: updated.trickle_tokens,
            })
        }
    }
}
