//! Buzzword shop.

use crunch_core::currency::{ensure_funds, Currency};
use crunch_core::error::CoreError;
use crunch_core::types::DbId;
use crunch_db::models::buzzword::BuzzwordListing;
use crunch_db::repositories::{BuzzwordRepo, UserRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{user_not_found, EconomyResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuzzwordShop {
    pub buzzwords: Vec<BuzzwordListing>,
    pub crunch_coin: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOutcome {
    pub buzzword_id: DbId,
    pub name: String,
    pub cost: i64,
    pub quantity: i32,
    pub crunch_coin: i64,
}

/// The catalogue, cheapest first, with what `user_id` holds.
pub async fn list(pool: &PgPool, user_id: DbId) -> EconomyResult<BuzzwordShop> {
    let user = UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;
    let buzzwords = BuzzwordRepo::list_with_quantity(pool, user_id).await?;
    Ok(BuzzwordShop {
        buzzwords,
        crunch_coin: user.crunch_coin,
    })
}

/// Buy one unit of a buzzword with CrunchCoin.
pub async fn buy(pool: &PgPool, user_id: DbId, buzzword_id: DbId) -> EconomyResult<PurchaseOutcome> {
    let mut tx = pool.begin().await?;

    let user = UserRepo::lock(&mut *tx, user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;
    let buzzword = BuzzwordRepo::find_by_id(&mut *tx, buzzword_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Buzzword",
            id: buzzword_id,
        })?;

    ensure_funds(Currency::CrunchCoin, buzzword.cost, user.crunch_coin).inspect_err(|e| {
        tracing::debug!(user_id, buzzword_id, error = %e, "Buzzword purchase rejected");
    })?;

    let updated = UserRepo::adjust_balances(&mut *tx, user_id, -buzzword.cost, 0).await?;
    let inventory = BuzzwordRepo::add_to_inventory(&mut *tx, user_id, buzzword_id).await?;

    tx.commit().await?;

    tracing::info!(user_id, buzzword_id, cost = buzzword.cost, quantity = inventory.quantity, "Buzzword purchased");

    Ok(PurchaseOutcome {
        buzzword_id,
        name: buzzword.name,
        cost: buzzword.cost,
        quantity: inventory.quantity,
        crunch_coin: updated.crunch_coin,
    })
}
