//! Gacha pull rates, pity, costs, and the rarity roll (pure logic).
//!
//! The roll is a pure function of `(pity_counter, rate_boost_percent, draw)`;
//! callers own the RNG and commit the resulting pity state themselves.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::error::CoreError;
use crate::rarity::{Rarity, RarityTable};

// ---------------------------------------------------------------------------
// Rates
// ---------------------------------------------------------------------------

/// Base pull rates in percent, 1★ through 5★. Must sum to 100.
pub const BASE_RATES: RarityTable<u32> = RarityTable::new([50, 30, 15, 4, 1]);

/// Pulls without a 5★ after which the next pull is a guaranteed 5★.
pub const PITY_THRESHOLD: i32 = 100;

/// Pity counter value at which the 5★ rate starts ramping.
pub const SOFT_PITY_START: i32 = 75;

/// Extra 5★ percent per pull once soft pity is active.
pub const SOFT_PITY_RATE_INCREASE: f64 = 5.0;

// ---------------------------------------------------------------------------
// Costs
// ---------------------------------------------------------------------------

pub const PULL_COST_CRUNCH_COIN: i64 = 100;
pub const PULL_COST_TRICKLE_TOKENS: i64 = 500;

/// Number of rolls in a multi-pull.
pub const TEN_PULL_SIZE: usize = 10;

/// Bulk price for ten pulls (one pull free).
pub const TEN_PULL_COST_CRUNCH_COIN: i64 = 900;
pub const TEN_PULL_COST_TRICKLE_TOKENS: i64 = 4_500;

/// Power added to an owned character when it is pulled again.
pub const DUPLICATE_POWER_BONUS: RarityTable<i64> = RarityTable::new([10, 25, 50, 100, 200]);

/// Minimum rarity a ten-pull is guaranteed to contain.
pub const TEN_PULL_FLOOR_RARITY: Rarity = Rarity::RARE;

// ---------------------------------------------------------------------------
// Pull shapes
// ---------------------------------------------------------------------------

/// How many pulls a request performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PullCount {
    Single,
    Ten,
}

impl PullCount {
    pub fn rolls(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Ten => TEN_PULL_SIZE,
        }
    }
}

impl TryFrom<u32> for PullCount {
    type Error = CoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Single),
            10 => Ok(Self::Ten),
            _ => Err(CoreError::Validation(
                "Invalid pull count. Must be 1 or 10.".to_string(),
            )),
        }
    }
}

impl From<PullCount> for u32 {
    fn from(value: PullCount) -> Self {
        value.rolls() as u32
    }
}

/// Why a pull is being performed. Drives charging and pity bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PullKind {
    /// New-account welcome pull: always 1★, free, pity untouched.
    Welcome,
    /// Weekly free pull: free, otherwise a normal roll.
    WeeklyFree,
    /// Paid with CrunchCoin or Trickle Tokens.
    Paid,
}

impl PullKind {
    pub fn is_free(self) -> bool {
        !matches!(self, Self::Paid)
    }
}

/// Price of a request in the chosen currency.
pub fn pull_cost(currency: Currency, count: PullCount) -> i64 {
    match (currency, count) {
        (Currency::CrunchCoin, PullCount::Single) => PULL_COST_CRUNCH_COIN,
        (Currency::TrickleTokens, PullCount::Single) => PULL_COST_TRICKLE_TOKENS,
        (Currency::CrunchCoin, PullCount::Ten) => TEN_PULL_COST_CRUNCH_COIN,
        (Currency::TrickleTokens, PullCount::Ten) => TEN_PULL_COST_TRICKLE_TOKENS,
    }
}

// ---------------------------------------------------------------------------
// Rarity roll
// ---------------------------------------------------------------------------

/// True when the next pull is the guaranteed 5★ (pull #100 since the last one).
pub fn is_hard_pity(pity_counter: i32) -> bool {
    pity_counter >= PITY_THRESHOLD - 1
}

/// Effective 5★ rate in percent for the given pity state and event boost.
///
/// Soft pity adds `(pity_counter - 75 + 1) * 5` once the counter reaches 75.
pub fn five_star_rate(pity_counter: i32, rate_boost_percent: i32) -> f64 {
    let mut rate = f64::from(BASE_RATES.get(Rarity::LEGENDARY)) + f64::from(rate_boost_percent);
    if pity_counter >= SOFT_PITY_START {
        let extra_pulls = pity_counter - SOFT_PITY_START + 1;
        rate += f64::from(extra_pulls) * SOFT_PITY_RATE_INCREASE;
    }
    rate
}

/// Map a uniform draw in `[0, 100)` to a rarity.
///
/// Thresholds are walked 5★, 4★, 3★, 2★ with the boosted 5★ rate and the
/// fixed base rates for the rest; anything left over is 1★.
pub fn rarity_for_draw(pity_counter: i32, rate_boost_percent: i32, draw: f64) -> Rarity {
    if is_hard_pity(pity_counter) {
        return Rarity::LEGENDARY;
    }

    let mut cumulative = five_star_rate(pity_counter, rate_boost_percent);
    if draw < cumulative {
        return Rarity::LEGENDARY;
    }

    for rarity in [Rarity::SUPER_RARE, Rarity::RARE, Rarity::UNCOMMON] {
        cumulative += f64::from(BASE_RATES.get(rarity));
        if draw < cumulative {
            return rarity;
        }
    }

    Rarity::COMMON
}

/// Roll a rarity using the caller's RNG.
pub fn roll_rarity<R: Rng + ?Sized>(rng: &mut R, pity_counter: i32, rate_boost_percent: i32) -> Rarity {
    if is_hard_pity(pity_counter) {
        return Rarity::LEGENDARY;
    }
    let draw = rng.random::<f64>() * 100.0;
    rarity_for_draw(pity_counter, rate_boost_percent, draw)
}

/// Pity counter after a pull of the given rarity.
///
/// 5★ resets to zero, anything else adds one. The welcome pull leaves it alone.
pub fn next_pity_counter(current: i32, rarity: Rarity, kind: PullKind) -> i32 {
    match kind {
        PullKind::Welcome => current,
        _ if rarity == Rarity::LEGENDARY => 0,
        _ => current + 1,
    }
}

/// Pulls remaining until hard pity triggers (the triggering pull included).
pub fn pulls_until_hard_pity(pity_counter: i32) -> i32 {
    (PITY_THRESHOLD - pity_counter).max(1)
}

/// Duplicate bonus actually granted, never pushing fed power past `max_fed_power`.
pub fn duplicate_bonus(rarity: Rarity, fed_power: i64, max_fed_power: i64) -> i64 {
    DUPLICATE_POWER_BONUS
        .get(rarity)
        .min(max_fed_power - fed_power)
        .max(0)
}

/// True when none of the rolled rarities meets the ten-pull floor.
pub fn needs_guarantee_floor(rarities: &[Rarity]) -> bool {
    !rarities.is_empty() && rarities.iter().all(|r| *r < TEN_PULL_FLOOR_RARITY)
}

/// Pick a uniformly random index into a pool of `len` items.
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Option<usize> {
    (len > 0).then(|| rng.random_range(0..len))
}

// ---------------------------------------------------------------------------
// Published rate sheet
// ---------------------------------------------------------------------------

/// One row of the public rate disclosure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateEntry {
    pub rarity: Rarity,
    pub label: &'static str,
    pub percent: u32,
    pub duplicate_bonus: i64,
}

/// Rate disclosure ordered 5★ first.
pub fn rate_sheet() -> Vec<RateEntry> {
    BASE_RATES
        .iter()
        .rev()
        .map(|(rarity, percent)| RateEntry {
            rarity,
            label: rarity.label(),
            percent,
            duplicate_bonus: DUPLICATE_POWER_BONUS.get(rarity),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // -- Rates --

    #[test]
    fn base_rates_sum_to_one_hundred() {
        let total: u32 = BASE_RATES.as_slice().iter().sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn five_star_rate_is_base_below_soft_pity() {
        assert_eq!(five_star_rate(0, 0), 1.0);
        assert_eq!(five_star_rate(74, 0), 1.0);
    }

    #[test]
    fn soft_pity_ramps_five_percent_per_pull() {
        assert_eq!(five_star_rate(75, 0), 6.0);
        assert_eq!(five_star_rate(76, 0), 11.0);
        assert_eq!(five_star_rate(98, 0), 1.0 + 24.0 * 5.0);
    }

    #[test]
    fn soft_pity_is_monotonic() {
        let mut previous = five_star_rate(75, 0);
        for pity in 76..=98 {
            let rate = five_star_rate(pity, 0);
            assert!(rate >= previous, "rate dropped at pity {pity}");
            previous = rate;
        }
    }

    #[test]
    fn rate_boost_adds_to_five_star_rate() {
        assert_eq!(five_star_rate(0, 2), 3.0);
        assert_eq!(five_star_rate(75, 2), 8.0);
    }

    // -- Roll thresholds --

    #[test]
    fn draw_thresholds_follow_base_split() {
        assert_eq!(rarity_for_draw(0, 0, 0.0), Rarity::LEGENDARY);
        assert_eq!(rarity_for_draw(0, 0, 0.99), Rarity::LEGENDARY);
        assert_eq!(rarity_for_draw(0, 0, 1.0), Rarity::SUPER_RARE);
        assert_eq!(rarity_for_draw(0, 0, 4.99), Rarity::SUPER_RARE);
        assert_eq!(rarity_for_draw(0, 0, 5.0), Rarity::RARE);
        assert_eq!(rarity_for_draw(0, 0, 19.99), Rarity::RARE);
        assert_eq!(rarity_for_draw(0, 0, 20.0), Rarity::UNCOMMON);
        assert_eq!(rarity_for_draw(0, 0, 49.99), Rarity::UNCOMMON);
        assert_eq!(rarity_for_draw(0, 0, 50.0), Rarity::COMMON);
        assert_eq!(rarity_for_draw(0, 0, 99.99), Rarity::COMMON);
    }

    #[test]
    fn soft_pity_shifts_lower_thresholds() {
        // 5★ band is [0, 6) at pity 75, so 4★ starts at 6.
        assert_eq!(rarity_for_draw(75, 0, 5.5), Rarity::LEGENDARY);
        assert_eq!(rarity_for_draw(75, 0, 6.0), Rarity::SUPER_RARE);
    }

    #[test]
    fn hard_pity_forces_legendary_for_any_draw() {
        assert!(is_hard_pity(99));
        assert!(!is_hard_pity(98));
        assert_eq!(rarity_for_draw(99, 0, 99.99), Rarity::LEGENDARY);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(roll_rarity(&mut rng, 99, 0), Rarity::LEGENDARY);
        }
    }

    #[test]
    fn seeded_rolls_roughly_match_rates() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0u32; 5];
        let rolls = 100_000;
        for _ in 0..rolls {
            counts[roll_rarity(&mut rng, 0, 0).index()] += 1;
        }
        let common_pct = f64::from(counts[0]) / f64::from(rolls) * 100.0;
        let legendary_pct = f64::from(counts[4]) / f64::from(rolls) * 100.0;
        assert!((48.0..52.0).contains(&common_pct), "common at {common_pct}%");
        assert!((0.7..1.3).contains(&legendary_pct), "legendary at {legendary_pct}%");
    }

    // -- Pity bookkeeping --

    #[test]
    fn pity_increments_on_non_legendary() {
        assert_eq!(next_pity_counter(10, Rarity::SUPER_RARE, PullKind::Paid), 11);
        assert_eq!(next_pity_counter(98, Rarity::COMMON, PullKind::WeeklyFree), 99);
    }

    #[test]
    fn pity_resets_on_legendary() {
        assert_eq!(next_pity_counter(99, Rarity::LEGENDARY, PullKind::Paid), 0);
        assert_eq!(next_pity_counter(3, Rarity::LEGENDARY, PullKind::Paid), 0);
    }

    #[test]
    fn welcome_pull_leaves_pity_alone() {
        assert_eq!(next_pity_counter(40, Rarity::COMMON, PullKind::Welcome), 40);
    }

    #[test]
    fn hundredth_pull_without_legendary_is_legendary() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pity = 0;
        for _ in 0..PITY_THRESHOLD {
            let rarity = roll_rarity(&mut rng, pity, 0);
            if is_hard_pity(pity) {
                assert_eq!(rarity, Rarity::LEGENDARY);
            }
            pity = next_pity_counter(pity, rarity, PullKind::Paid);
            assert!(pity < PITY_THRESHOLD);
        }
    }

    #[test]
    fn pulls_until_hard_pity_counts_down() {
        assert_eq!(pulls_until_hard_pity(0), 100);
        assert_eq!(pulls_until_hard_pity(99), 1);
    }

    // -- Costs and shapes --

    #[test]
    fn ten_pull_is_discounted() {
        assert!(pull_cost(Currency::CrunchCoin, PullCount::Ten) < 10 * PULL_COST_CRUNCH_COIN);
        assert!(
            pull_cost(Currency::TrickleTokens, PullCount::Ten) < 10 * PULL_COST_TRICKLE_TOKENS
        );
    }

    #[test]
    fn pull_count_accepts_only_one_or_ten() {
        assert_eq!(PullCount::try_from(1).unwrap(), PullCount::Single);
        assert_eq!(PullCount::try_from(10).unwrap(), PullCount::Ten);
        assert_matches!(PullCount::try_from(5), Err(CoreError::Validation(_)));
    }

    // -- Duplicates and the ten-pull floor --

    #[test]
    fn duplicate_bonus_never_passes_cap() {
        assert_eq!(duplicate_bonus(Rarity::RARE, 0, 400), 50);
        assert_eq!(duplicate_bonus(Rarity::RARE, 380, 400), 20);
        assert_eq!(duplicate_bonus(Rarity::RARE, 400, 400), 0);
    }

    #[test]
    fn floor_needed_only_when_everything_is_below_rare() {
        let low = [Rarity::COMMON; 10];
        assert!(needs_guarantee_floor(&low));

        let mut with_rare = low;
        with_rare[4] = Rarity::RARE;
        assert!(!needs_guarantee_floor(&with_rare));

        assert!(!needs_guarantee_floor(&[]));
    }

    #[test]
    fn pick_index_handles_empty_pool() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(pick_index(&mut rng, 0), None);
        let idx = pick_index(&mut rng, 4).unwrap();
        assert!(idx < 4);
    }

    #[test]
    fn rate_sheet_lists_legendary_first() {
        let sheet = rate_sheet();
        assert_eq!(sheet.len(), 5);
        assert_eq!(sheet[0].rarity, Rarity::LEGENDARY);
        assert_eq!(sheet[0].duplicate_bonus, 200);
        assert_eq!(sheet[4].percent, 50);
    }
}
