//! Gacha pulls: welcome, weekly free, paid singles and ten-pulls.

use std::collections::HashMap;

use crunch_core::banner::{roll_banner, BannerContext, BannerDecision, BannerOutcome, FIFTY_FIFTY_WIN_PERCENT};
use crunch_core::currency::{ensure_funds, Currency};
use crunch_core::error::CoreError;
use crunch_core::feed::MAX_FED_POWER;
use crunch_core::gacha::{
    duplicate_bonus, needs_guarantee_floor, next_pity_counter, pick_index, pull_cost,
    pulls_until_hard_pity, rate_sheet, roll_rarity, PullCount, PullKind, RateEntry,
    PITY_THRESHOLD, PULL_COST_CRUNCH_COIN, PULL_COST_TRICKLE_TOKENS, SOFT_PITY_RATE_INCREASE,
    SOFT_PITY_START, TEN_PULL_COST_CRUNCH_COIN, TEN_PULL_COST_TRICKLE_TOKENS,
    TEN_PULL_FLOOR_RARITY,
};
use crunch_core::rarity::Rarity;
use crunch_core::types::{DbId, Timestamp};
use crunch_db::models::banner::ActiveBanner;
use crunch_db::models::character::Character;
use crunch_db::models::user::{PullStateUpdate, User};
use crunch_db::repositories::{BannerRepo, CharacterRepo, UserCharacterRepo, UserRepo};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::error::{user_not_found, EconomyResult};
use crate::events;

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

fn single_pull() -> PullCount {
    PullCount::Single
}

/// A pull request as sent by the client.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    /// Required for paid pulls, ignored for free ones.
    pub currency: Option<Currency>,
    #[serde(default = "single_pull")]
    pub count: PullCount,
    pub banner_id: Option<DbId>,
    #[serde(default)]
    pub use_weekly_free_pull: bool,
}

/// One character awarded by a pull.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PulledCharacter {
    pub character: Character,
    pub rarity: Rarity,
    pub user_character_id: DbId,
    pub is_duplicate: bool,
    /// Fed power granted for a duplicate, after the rarity cap.
    pub power_bonus: i64,
    pub featured: bool,
    pub lost_fifty_fifty: bool,
    /// Pity counter before this roll.
    pub pity_before: i32,
    /// Replaced by the ten-pull floor.
    pub guarantee_floor: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullOutcome {
    pub kind: PullKind,
    pub currency: Option<Currency>,
    pub cost: i64,
    pub results: Vec<PulledCharacter>,
    pub pity_counter: i32,
    pub pulls_until_hard_pity: i32,
    pub guaranteed_banner: bool,
    pub weekly_free_pull: bool,
    pub total_pulls: i64,
    pub crunch_coin: i64,
    pub trickle_tokens: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyCosts {
    pub crunch_coin: i64,
    pub trickle_tokens: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullCosts {
    pub single: CurrencyCosts,
    pub ten: CurrencyCosts,
}

pub const PULL_COSTS: PullCosts = PullCosts {
    single: CurrencyCosts {
        crunch_coin: PULL_COST_CRUNCH_COIN,
        trickle_tokens: PULL_COST_TRICKLE_TOKENS,
    },
    ten: CurrencyCosts {
        crunch_coin: TEN_PULL_COST_CRUNCH_COIN,
        trickle_tokens: TEN_PULL_COST_TRICKLE_TOKENS,
    },
};

/// Public rate disclosure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesInfo {
    pub rates: Vec<RateEntry>,
    pub hard_pity: i32,
    pub soft_pity_start: i32,
    pub soft_pity_increase_percent: f64,
    pub fifty_fifty_win_percent: f64,
    pub ten_pull_floor_rarity: Rarity,
    pub costs: PullCosts,
}

pub fn rates() -> RatesInfo {
    RatesInfo {
        rates: rate_sheet(),
        hard_pity: PITY_THRESHOLD,
        soft_pity_start: SOFT_PITY_START,
        soft_pity_increase_percent: SOFT_PITY_RATE_INCREASE,
        fifty_fifty_win_percent: FIFTY_FIFTY_WIN_PERCENT,
        ten_pull_floor_rarity: TEN_PULL_FLOOR_RARITY,
        costs: PULL_COSTS,
    }
}

/// A user's pull eligibility and pity state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullStatus {
    pub welcome_pull_available: bool,
    pub weekly_free_pull: bool,
    pub pity_counter: i32,
    pub pulls_until_hard_pity: i32,
    pub soft_pity_active: bool,
    pub guaranteed_banner: bool,
    pub total_pulls: i64,
    pub crunch_coin: i64,
    pub trickle_tokens: i64,
    pub rate_boost_percent: i32,
    pub costs: PullCosts,
}

// ---------------------------------------------------------------------------
// Read-only views
// ---------------------------------------------------------------------------

pub async fn pull_status(pool: &PgPool, user_id: DbId, now: Timestamp) -> EconomyResult<PullStatus> {
    let user = UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;
    let owned = UserCharacterRepo::count_for_user(pool, user_id).await?;
    let rate_boost_percent = events::rate_boost_percent(pool, now).await?;

    Ok(PullStatus {
        welcome_pull_available: owned == 0,
        weekly_free_pull: user.weekly_free_pull,
        pity_counter: user.pity_counter,
        pulls_until_hard_pity: pulls_until_hard_pity(user.pity_counter),
        soft_pity_active: user.pity_counter >= SOFT_PITY_START,
        guaranteed_banner: user.guaranteed_banner,
        total_pulls: user.total_pulls,
        crunch_coin: user.crunch_coin,
        trickle_tokens: user.trickle_tokens,
        rate_boost_percent,
        costs: PULL_COSTS,
    })
}

/// Banners running at `now`, with their featured character.
pub async fn active_banners(pool: &PgPool, now: Timestamp) -> EconomyResult<Vec<ActiveBanner>> {
    Ok(BannerRepo::list_active(pool, now).await?)
}

// ---------------------------------------------------------------------------
// Pull execution
// ---------------------------------------------------------------------------

/// Which kind of pull a request turns into for this user.
///
/// Users with no characters always get the welcome pull, whatever they asked for.
fn pull_kind(owned: i64, user: &User, request: &PullRequest) -> Result<PullKind, CoreError> {
    if owned == 0 {
        return Ok(PullKind::Welcome);
    }
    if request.use_weekly_free_pull {
        if request.count != PullCount::Single {
            return Err(CoreError::Validation(
                "The weekly free pull is a single pull.".to_string(),
            ));
        }
        if !user.weekly_free_pull {
            return Err(CoreError::Validation(
                "Weekly free pull already used.".to_string(),
            ));
        }
        return Ok(PullKind::WeeklyFree);
    }
    Ok(PullKind::Paid)
}

fn balance_of(user: &User, currency: Currency) -> i64 {
    match currency {
        Currency::CrunchCoin => user.crunch_coin,
        Currency::TrickleTokens => user.trickle_tokens,
    }
}

/// Characters per rarity, loaded on first use within a pull batch.
#[derive(Default)]
struct Catalog {
    by_rarity: HashMap<Rarity, Vec<Character>>,
}

impl Catalog {
    async fn choose<R: Rng>(
        &mut self,
        conn: &mut PgConnection,
        rng: &mut R,
        rarity: Rarity,
        featured_id: Option<DbId>,
    ) -> EconomyResult<Character> {
        if !self.by_rarity.contains_key(&rarity) {
            let rows = CharacterRepo::list_by_rarity(&mut *conn, rarity.stars()).await?;
            self.by_rarity.insert(rarity, rows);
        }
        let pool = self.by_rarity.get(&rarity).map(Vec::as_slice).unwrap_or_default();

        if let Some(featured) = featured_id.and_then(|id| pool.iter().find(|c| c.id == id)) {
            return Ok(featured.clone());
        }
        let index = pick_index(rng, pool.len()).ok_or_else(|| {
            CoreError::Internal(format!("No characters available at {rarity}"))
        })?;
        Ok(pool[index].clone())
    }
}

fn featured_id(outcome: &BannerOutcome, banner: Option<&BannerContext>) -> Option<DbId> {
    match (outcome.decision, banner) {
        (BannerDecision::Featured, Some(banner)) => Some(banner.featured_character_id),
        _ => None,
    }
}

struct Acquisition {
    user_character_id: DbId,
    is_duplicate: bool,
    power_bonus: i64,
}

/// Grant a character: a new ownership row, or a capped fed-power bonus for a duplicate.
async fn acquire(
    conn: &mut PgConnection,
    user_id: DbId,
    character: &Character,
    rarity: Rarity,
) -> EconomyResult<Acquisition> {
    match UserCharacterRepo::lock_owned(&mut *conn, user_id, character.id).await? {
        Some(owned) => {
            let bonus = duplicate_bonus(rarity, owned.fed_power, MAX_FED_POWER.get(rarity));
            if bonus > 0 {
                UserCharacterRepo::add_fed_power(&mut *conn, owned.id, bonus).await?;
            }
            Ok(Acquisition {
                user_character_id: owned.id,
                is_duplicate: true,
                power_bonus: bonus,
            })
        }
        None => {
            let created = UserCharacterRepo::create(&mut *conn, user_id, character.id).await?;
            Ok(Acquisition {
                user_character_id: created.id,
                is_duplicate: false,
                power_bonus: 0,
            })
        }
    }
}

/// Undo an acquisition replaced by the ten-pull floor.
async fn reverse(conn: &mut PgConnection, pulled: &PulledCharacter) -> EconomyResult<()> {
    if !pulled.is_duplicate {
        UserCharacterRepo::delete(&mut *conn, pulled.user_character_id).await?;
    } else if pulled.power_bonus > 0 {
        UserCharacterRepo::add_fed_power(&mut *conn, pulled.user_character_id, -pulled.power_bonus)
            .await?;
    }
    Ok(())
}

fn pulled(
    character: Character,
    rarity: Rarity,
    acquisition: Acquisition,
    outcome: &BannerOutcome,
    pity_before: i32,
    guarantee_floor: bool,
) -> PulledCharacter {
    PulledCharacter {
        character,
        rarity,
        user_character_id: acquisition.user_character_id,
        is_duplicate: acquisition.is_duplicate,
        power_bonus: acquisition.power_bonus,
        featured: outcome.decision == BannerDecision::Featured,
        lost_fifty_fifty: outcome.lost_fifty_fifty,
        pity_before,
        guarantee_floor,
    }
}

/// Run a pull request for `user_id`.
///
/// The user row stays locked for the whole batch, so pity read by roll `n`
/// is exactly what roll `n - 1` left behind and concurrent requests for the
/// same user queue up behind this one. Ten-pulls are charged once, up front.
pub async fn execute_pull<R: Rng>(
    pool: &PgPool,
    rng: &mut R,
    user_id: DbId,
    request: &PullRequest,
    now: Timestamp,
) -> EconomyResult<PullOutcome> {
    let mut tx = pool.begin().await?;

    let user = UserRepo::lock(&mut *tx, user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;
    let owned = UserCharacterRepo::count_for_user(&mut *tx, user_id).await?;
    let kind = pull_kind(owned, &user, request)?;

    let (currency, cost, rolls) = match kind {
        PullKind::Welcome | PullKind::WeeklyFree => (None, 0, 1),
        PullKind::Paid => {
            let currency = request.currency.ok_or_else(|| {
                CoreError::Validation(
                    "Invalid currency. Use 'crunchCoin' or 'trickleTokens'.".to_string(),
                )
            })?;
            let cost = pull_cost(currency, request.count);
            if let Err(e) = ensure_funds(currency, cost, balance_of(&user, currency)) {
                tracing::debug!(user_id, currency = currency.as_str(), cost, "Pull rejected: insufficient funds");
                return Err(e.into());
            }
            (Some(currency), cost, request.count.rolls())
        }
    };

    if let Some(currency) = currency {
        let (crunch_coin_delta, trickle_tokens_delta) = match currency {
            Currency::CrunchCoin => (-cost, 0),
            Currency::TrickleTokens => (0, -cost),
        };
        UserRepo::adjust_balances(&mut *tx, user_id, crunch_coin_delta, trickle_tokens_delta).await?;
    }

    let banner = match (kind, request.banner_id) {
        (PullKind::Welcome, _) | (_, None) => None,
        (_, Some(id)) => {
            let active = BannerRepo::find_active(&mut *tx, id, now)
                .await?
                .ok_or(CoreError::NotFound { entity: "Banner", id })?;
            Some(active.context()?)
        }
    };
    let rate_boost = match kind {
        PullKind::Welcome => 0,
        _ => events::rate_boost_percent(&mut *tx, now).await?,
    };

    let mut catalog = Catalog::default();
    let mut pity = user.pity_counter;
    let mut guaranteed = user.guaranteed_banner;
    let mut results = Vec::with_capacity(rolls);

    for _ in 0..rolls {
        let rarity = match kind {
            PullKind::Welcome => Rarity::COMMON,
            _ => roll_rarity(rng, pity, rate_boost),
        };
        let outcome = roll_banner(rng, rarity, banner.as_ref(), guaranteed);
        guaranteed = outcome.guaranteed_banner;

        let character = catalog
            .choose(&mut *tx, rng, rarity, featured_id(&outcome, banner.as_ref()))
            .await?;
        let acquisition = acquire(&mut *tx, user_id, &character, rarity).await?;
        results.push(pulled(character, rarity, acquisition, &outcome, pity, false));
        pity = next_pity_counter(pity, rarity, kind);
    }

    if request.count == PullCount::Ten && kind == PullKind::Paid {
        let rarities: Vec<Rarity> = results.iter().map(|r| r.rarity).collect();
        if needs_guarantee_floor(&rarities) {
            if let Some(replaced) = results.pop() {
                reverse(&mut *tx, &replaced).await?;
                let outcome = roll_banner(rng, TEN_PULL_FLOOR_RARITY, banner.as_ref(), guaranteed);
                guaranteed = outcome.guaranteed_banner;
                let character = catalog
                    .choose(&mut *tx, rng, TEN_PULL_FLOOR_RARITY, featured_id(&outcome, banner.as_ref()))
                    .await?;
                let acquisition = acquire(&mut *tx, user_id, &character, TEN_PULL_FLOOR_RARITY).await?;
                tracing::debug!(user_id, replaced = replaced.character.id, "Ten-pull floor applied");
                results.push(pulled(
                    character,
                    TEN_PULL_FLOOR_RARITY,
                    acquisition,
                    &outcome,
                    replaced.pity_before,
                    true,
                ));
            }
        }
    }

    let pulls_made = match kind {
        PullKind::Welcome => 0,
        _ => results.len() as i64,
    };
    let updated = UserRepo::record_pulls(
        &mut *tx,
        user_id,
        &PullStateUpdate {
            pity_counter: pity,
            guaranteed_banner: guaranteed,
            pulls_made,
            consume_weekly_free_pull: kind == PullKind::WeeklyFree,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        user_id,
        kind = ?kind,
        pulls = results.len(),
        cost,
        best_rarity = results.iter().map(|r| r.rarity.stars()).max().unwrap_or(0),
        pity_counter = updated.pity_counter,
        "Gacha pull committed",
    );

    Ok(PullOutcome {
        kind,
        currency,
        cost,
        results,
        pity_counter: updated.pity_counter,
        pulls_until_hard_pity: pulls_until_hard_pity(updated.pity_counter),
        guaranteed_banner: updated.guaranteed_banner,
        weekly_free_pull: updated.weekly_free_pull,
        total_pulls: updated.total_pulls,
        crunch_coin: updated.crunch_coin,
        trickle_tokens: updated.trickle_tokens,
    })
}
