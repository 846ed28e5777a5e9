//! Feed engine formulas: escalating CrunchCoin cost for capped power gains.

use serde::Serialize;

use crate::currency::{ensure_funds, Currency};
use crate::error::CoreError;
use crate::rarity::{Rarity, RarityTable};

/// Base CrunchCoin cost of the first feed, by rarity.
pub const BASE_FEED_COST: RarityTable<i64> = RarityTable::new([25, 50, 100, 200, 500]);

/// Fed power gained per feed, by rarity.
pub const POWER_PER_FEED: RarityTable<i64> = RarityTable::new([5, 8, 12, 18, 25]);

/// Fed power cap, by rarity.
pub const MAX_FED_POWER: RarityTable<i64> = RarityTable::new([100, 200, 400, 800, 1500]);

/// Display names for feed progress. The last entry is reserved for maxed characters.
pub const FEED_LEVEL_NAMES: [&str; 10] = [
    "Unfed",
    "Angel Snack",
    "Seed Nibble",
    "Pre-Series Bite",
    "Series A Lunch",
    "Growth Meal",
    "Late-Stage Feast",
    "Pre-IPO Gorge",
    "Unicorn Banquet",
    "Fully Fed",
];

pub fn feed_level(fed_power: i64, rarity: Rarity) -> i64 {
    fed_power / POWER_PER_FEED.get(rarity)
}

/// `base_cost * (feed_level + 1)`.
pub fn next_feed_cost(fed_power: i64, rarity: Rarity) -> i64 {
    BASE_FEED_COST.get(rarity) * (feed_level(fed_power, rarity) + 1)
}

pub fn is_max_fed_power(fed_power: i64, rarity: Rarity) -> bool {
    fed_power >= MAX_FED_POWER.get(rarity)
}

/// Bucket a feed level into one of the satirical level names.
pub fn feed_level_name(fed_power: i64, rarity: Rarity) -> &'static str {
    let last = FEED_LEVEL_NAMES.len() - 1;
    if is_max_fed_power(fed_power, rarity) {
        return FEED_LEVEL_NAMES[last];
    }

    let level = feed_level(fed_power, rarity);
    let per_feed = POWER_PER_FEED.get(rarity);
    let max_feeds = (MAX_FED_POWER.get(rarity) + per_feed - 1) / per_feed;
    let non_max_names = (FEED_LEVEL_NAMES.len() - 2) as i64;

    let bucket = level * non_max_names / max_feeds + i64::from(level > 0);
    let index = bucket.min(non_max_names) as usize;
    FEED_LEVEL_NAMES[index]
}

/// A validated feed, ready to be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPlan {
    pub cost: i64,
    pub power_gained: i64,
    pub new_fed_power: i64,
}

/// Check the cap, then the balance, and compute the feed's effect.
///
/// The gain is clamped so fed power lands exactly on the cap.
pub fn plan_feed(fed_power: i64, rarity: Rarity, crunch_coin: i64) -> Result<FeedPlan, CoreError> {
    if is_max_fed_power(fed_power, rarity) {
        return Err(CoreError::AlreadyMaxed);
    }

    let cost = next_feed_cost(fed_power, rarity);
    ensure_funds(Currency::CrunchCoin, cost, crunch_coin)?;

    let new_fed_power = (fed_power + POWER_PER_FEED.get(rarity)).min(MAX_FED_POWER.get(rarity));
    Ok(FeedPlan {
        cost,
        power_gained: new_fed_power - fed_power,
        new_fed_power,
    })
}

/// Feed progress for one owned character, as shown in the collection view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedStatus {
    pub feed_level: i64,
    pub level_name: &'static str,
    pub max_fed_power: i64,
    pub maxed: bool,
    /// `None` once maxed.
    pub next_cost: Option<i64>,
}

pub fn feed_status(fed_power: i64, rarity: Rarity) -> FeedStatus {
    let maxed = is_max_fed_power(fed_power, rarity);
    FeedStatus {
        feed_level: feed_level(fed_power, rarity),
        level_name: feed_level_name(fed_power, rarity),
        max_fed_power: MAX_FED_POWER.get(rarity),
        maxed,
        next_cost: (!maxed).then(|| next_feed_cost(fed_power, rarity)),
    }
}
