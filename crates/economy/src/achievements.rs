//! Achievement checks and the unlock listing.

use crunch_core::achievements::{is_earned, AchievementProgress};
use crunch_core::rarity::Rarity;
use crunch_core::types::DbId;
use crunch_db::models::achievement::{Achievement, AchievementStatus};
use crunch_db::models::user::User;
use crunch_db::repositories::{AchievementRepo, BattleRepo, CharacterRepo, UserCharacterRepo, UserRepo};
use serde::Serialize;
use sqlx::{PgConnection, PgPool};

use crate::error::{user_not_found, EconomyResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementView {
    #[serde(flatten)]
    pub achievement: AchievementStatus,
    pub unlocked: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutcome {
    pub newly_unlocked: Vec<Achievement>,
    pub crunch_coin: i64,
    pub trickle_tokens: i64,
}

/// The catalogue with the caller's unlock state.
pub async fn list(pool: &PgPool, user_id: DbId) -> EconomyResult<Vec<AchievementView>> {
    let rows = AchievementRepo::list_with_status(pool, user_id).await?;
    Ok(rows
        .into_iter()
        .map(|achievement| AchievementView {
            unlocked: achievement.unlocked_at.is_some(),
            achievement,
        })
        .collect())
}

async fn load_progress(conn: &mut PgConnection, user: &User) -> EconomyResult<AchievementProgress> {
    Ok(AchievementProgress {
        character_count: UserCharacterRepo::count_for_user(&mut *conn, user.id).await?,
        catalog_size: CharacterRepo::count(&mut *conn).await?,
        owns_legendary: UserCharacterRepo::owns_rarity(&mut *conn, user.id, Rarity::LEGENDARY.stars()).await?,
        wins: BattleRepo::count_wins(&mut *conn, user.id).await?,
        total_pulls: user.total_pulls,
        total_spent_cents: user.total_spent_cents,
    })
}

/// Evaluate every locked achievement and grant the ones now earned.
///
/// Keys without a rule are skipped. Safe to call repeatedly: grants are
/// unique per user, so rewards are credited at most once.
pub async fn check(pool: &PgPool, user_id: DbId) -> EconomyResult<CheckOutcome> {
    let mut tx = pool.begin().await?;

    let mut user = UserRepo::lock(&mut *tx, user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;
    let progress = load_progress(&mut *tx, &user).await?;

    let mut newly_unlocked = Vec::new();
    for achievement in AchievementRepo::list_locked(&mut *tx, user_id).await? {
        if !is_earned(&achievement.key, &progress) {
            continue;
        }
        if !AchievementRepo::grant(&mut *tx, user_id, achievement.id).await? {
            continue;
        }
        if achievement.reward_crunch_coin != 0 || achievement.reward_trickle_tokens != 0 {
            user = UserRepo::adjust_balances(
                &mut *tx,
                user_id,
                achievement.reward_crunch_coin,
                achievement.reward_trickle_tokens,
            )
            .await?;
        }
        newly_unlocked.push(achievement);
    }

    tx.commit().await?;

    for achievement in &newly_unlocked {
        tracing::info!(user_id, key = %achievement.key, "Achievement unlocked");
    }

    Ok(CheckOutcome {
        newly_unlocked,
        crunch_coin: user.crunch_coin,
        trickle_tokens: user.trickle_tokens,
    })
}

