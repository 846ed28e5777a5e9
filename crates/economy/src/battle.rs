//! Battles: preconditions, matchmaking, resolution and ranking settlement.

use crunch_core::battle::{
    check_attacker, resolve_fight, settle_ranking, SidePower, MATCHMAKING_POOL_SIZE,
    MATCHMAKING_RANGE,
};
use crunch_core::error::CoreError;
use crunch_core::gacha::pick_index;
use crunch_core::types::{DbId, Timestamp};
use crunch_db::models::battle::{BattleHistoryEntry, CreateBattle, Opponent};
use crunch_db::repositories::{BattleRepo, BuzzwordRepo, UserCharacterRepo, UserRepo};
use rand::Rng;
use serde::Serialize;
use sqlx::{PgConnection, PgPool};

use crate::error::{user_not_found, EconomyError, EconomyResult};

pub const DEFAULT_HISTORY_LIMIT: i64 = 20;
pub const MAX_HISTORY_LIMIT: i64 = 100;

/// One participant in a resolved battle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    pub id: DbId,
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub power: SidePower,
    pub ranking_points_before: i64,
    pub ranking_points_after: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleOutcome {
    pub battle_id: DbId,
    pub attacker: Combatant,
    pub defender: Combatant,
    pub winner_id: DbId,
    pub attacker_won: bool,
    /// Points credited to the winner.
    pub ranking_points_change: i64,
    /// Points debited from the loser, capped at their balance.
    pub ranking_points_lost: i64,
    pub buzzword_used: Option<String>,
}

fn rejected(attacker_id: DbId, err: CoreError) -> EconomyError {
    tracing::debug!(attacker_id, error = %err, "Battle rejected");
    err.into()
}

/// Candidates near the attacker's ranking, falling back to the top of the ladder.
async fn find_opponents(
    conn: &mut PgConnection,
    attacker_id: DbId,
    ranking: i64,
) -> EconomyResult<Vec<Opponent>> {
    let near = BattleRepo::find_opponents_near(
        &mut *conn,
        attacker_id,
        ranking,
        MATCHMAKING_RANGE,
        MATCHMAKING_POOL_SIZE,
    )
    .await?;
    if !near.is_empty() {
        return Ok(near);
    }
    Ok(BattleRepo::find_top_opponents(&mut *conn, attacker_id, MATCHMAKING_POOL_SIZE).await?)
}

/// Fight a matchmade opponent, optionally spending one buzzword.
///
/// Preconditions run in a fixed order and the first failure wins. Battles by
/// the same attacker are serialised, and both players' rows are locked in
/// ascending id order before ranking points move.
pub async fn execute_battle<R: Rng>(
    pool: &PgPool,
    rng: &mut R,
    attacker_id: DbId,
    buzzword_id: Option<DbId>,
    now: Timestamp,
) -> EconomyResult<BattleOutcome> {
    let mut tx = pool.begin().await?;
    BattleRepo::lock_attacker(&mut *tx, attacker_id).await?;

    let attacker = UserRepo::find_by_id(&mut *tx, attacker_id)
        .await?
        .ok_or_else(|| user_not_found(attacker_id))?;
    let character_count = UserCharacterRepo::count_for_user(&mut *tx, attacker_id).await?;
    let last_battle_at = BattleRepo::last_attack_at(&mut *tx, attacker_id).await?;
    let attacker_power = UserCharacterRepo::total_power(&mut *tx, attacker_id).await?;
    check_attacker(character_count, last_battle_at, attacker_power, now)
        .map_err(|e| rejected(attacker_id, e))?;

    let buzzword = match buzzword_id {
        Some(id) => {
            let buzzword = BuzzwordRepo::find_by_id(&mut *tx, id)
                .await?
                .ok_or(CoreError::NotFound { entity: "Buzzword", id })?;
            if BuzzwordRepo::quantity_owned(&mut *tx, attacker_id, id).await? < 1 {
                return Err(rejected(attacker_id, CoreError::NotOwned("buzzword")));
            }
            Some(buzzword)
        }
        None => None,
    };

    let candidates = find_opponents(&mut *tx, attacker_id, attacker.ranking_points).await?;
    let opponent = pick_index(rng, candidates.len())
        .map(|i| candidates[i].clone())
        .ok_or_else(|| rejected(attacker_id, CoreError::NoOpponents))?;

    let locked = UserRepo::lock_many(&mut *tx, &[attacker_id, opponent.id]).await?;
    let find = |id: DbId| {
        locked
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| user_not_found(id))
    };
    let attacker = find(attacker_id)?;
    let defender = find(opponent.id)?;

    if let Some(buzzword) = &buzzword {
        let inventory = BuzzwordRepo::lock_inventory(&mut *tx, attacker_id, buzzword.id)
            .await?
            .filter(|row| row.quantity > 0)
            .ok_or_else(|| rejected(attacker_id, CoreError::NotOwned("buzzword")))?;
        BuzzwordRepo::consume(&mut *tx, inventory.id).await?;
    }

    let defender_power = UserCharacterRepo::total_power(&mut *tx, defender.id).await?;
    let effect = buzzword.as_ref().map(|b| b.effect.0);
    let fight = resolve_fight(rng, attacker_power, defender_power, effect);
    let settlement = settle_ranking(attacker.ranking_points, defender.ranking_points, fight.attacker_won);

    let (winner_id, loser_id) = if fight.attacker_won {
        (attacker.id, defender.id)
    } else {
        (defender.id, attacker.id)
    };

    let battle = BattleRepo::create(
        &mut *tx,
        &CreateBattle {
            attacker_id: attacker.id,
            defender_id: defender.id,
            winner_id,
            attacker_power: fight.attacker.boosted_power,
            defender_power: fight.defender.boosted_power,
            attacker_roll: fight.attacker.roll,
            defender_roll: fight.defender.roll,
            ranking_points_change: settlement.change,
            buzzwords_used: buzzword.iter().map(|b| b.id).collect(),
        },
    )
    .await?;
    UserRepo::add_ranking_points(&mut *tx, winner_id, settlement.change).await?;
    UserRepo::add_ranking_points(&mut *tx, loser_id, -settlement.loss).await?;

    tx.commit().await?;

    tracing::info!(
        battle_id = battle.id,
        attacker_id = attacker.id,
        defender_id = defender.id,
        winner_id,
        attacker_final = fight.attacker.final_power,
        defender_final = fight.defender.final_power,
        change = settlement.change,
        "Battle committed",
    );

    Ok(BattleOutcome {
        battle_id: battle.id,
        attacker: Combatant {
            id: attacker.id,
            display_name: attacker.display_name,
            power: fight.attacker,
            ranking_points_before: attacker.ranking_points,
            ranking_points_after: settlement.attacker_after,
        },
        defender: Combatant {
            id: defender.id,
            display_name: defender.display_name,
            power: fight.defender,
            ranking_points_before: defender.ranking_points,
            ranking_points_after: settlement.defender_after,
        },
        winner_id,
        attacker_won: fight.attacker_won,
        ranking_points_change: settlement.change,
        ranking_points_lost: settlement.loss,
        buzzword_used: buzzword.map(|b| b.name),
    })
}

/// Most recent battles `user_id` fought on either side, newest first.
pub async fn battle_history(
    pool: &PgPool,
    user_id: DbId,
    limit: Option<i64>,
) -> EconomyResult<Vec<BattleHistoryEntry>> {
    let limit = limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    Ok(BattleRepo::list_for_user(pool, user_id, limit).await?)
}
