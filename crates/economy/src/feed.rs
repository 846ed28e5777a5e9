//! Feeding owned characters, and the collection view that previews it.

use crunch_core::error::CoreError;
use crunch_core::feed::{feed_status, plan_feed, FeedStatus};
use crunch_core::types::DbId;
use crunch_db::models::user_character::OwnedCharacter;
use crunch_db::repositories::{UserCharacterRepo, UserRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{user_not_found, EconomyResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedOutcome {
    pub user_character_id: DbId,
    pub character_name: String,
    pub cost: i64,
    pub power_gained: i64,
    pub new_fed_power: i64,
    pub total_power: i64,
    pub crunch_coin: i64,
    #[serde(flatten)]
    pub status: FeedStatus,
}

/// Spend CrunchCoin to raise one owned character's fed power.
pub async fn execute_feed(pool: &PgPool, user_id: DbId, user_character_id: DbId) -> EconomyResult<FeedOutcome> {
    let mut tx = pool.begin().await?;

    let user = UserRepo::lock(&mut *tx, user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;
    let owned = UserCharacterRepo::lock_detail(&mut *tx, user_character_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Character",
            id: user_character_id,
        })?;
    if owned.user_id != user_id {
        tracing::debug!(user_id, user_character_id, "Feed rejected: not owned");
        return Err(CoreError::NotOwned("character").into());
    }

    let rarity = owned.rarity()?;
    let plan = plan_feed(owned.fed_power, rarity, user.crunch_coin).inspect_err(|e| {
        tracing::debug!(user_id, user_character_id, error = %e, "Feed rejected");
    })?;

    let updated = UserRepo::adjust_balances(&mut *tx, user_id, -plan.cost, 0).await?;
    let new_fed_power = UserCharacterRepo::add_fed_power(&mut *tx, owned.id, plan.power_gained).await?;

    tx.commit().await?;

    tracing::info!(
        user_id,
        user_character_id,
        cost = plan.cost,
        power_gained = plan.power_gained,
        new_fed_power,
        "Character fed",
    );

    Ok(FeedOutcome {
        user_character_id: owned.id,
        character_name: owned.name,
        cost: plan.cost,
        power_gained: plan.power_gained,
        new_fed_power,
        total_power: owned.base_power + new_fed_power,
        crunch_coin: updated.crunch_coin,
        status: feed_status(new_fed_power, rarity),
    })
}

/// An owned character with its feed progress.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntry {
    #[serde(flatten)]
    pub character: OwnedCharacter,
    pub total_power: i64,
    #[serde(flatten)]
    pub feed: FeedStatus,
}

/// Everything `user_id` owns, strongest rarity first.
pub async fn collection(pool: &PgPool, user_id: DbId) -> EconomyResult<Vec<CollectionEntry>> {
    UserCharacterRepo::list_owned(pool, user_id)
        .await?
        .into_iter()
        .map(|character| -> EconomyResult<CollectionEntry> {
            let feed = feed_status(character.fed_power, character.rarity()?);
            Ok(CollectionEntry {
                total_power: character.total_power(),
                character,
                feed,
            })
        })
        .collect()
}
