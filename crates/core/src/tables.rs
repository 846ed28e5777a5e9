//! Startup validation of the per-rarity constant tables.

use crate::error::CoreError;
use crate::feed::{BASE_FEED_COST, MAX_FED_POWER, POWER_PER_FEED};
use crate::gacha::{BASE_RATES, DUPLICATE_POWER_BONUS};
use crate::rarity::{RarityTable, RARITY_COUNT};

fn check_positive(name: &str, table: &RarityTable<i64>) -> Result<(), CoreError> {
    let values = table.as_slice();
    if values.len() != RARITY_COUNT {
        return Err(CoreError::Internal(format!(
            "{name} has {} entries, expected {RARITY_COUNT}",
            values.len()
        )));
    }
    if let Some(bad) = values.iter().find(|v| **v <= 0) {
        return Err(CoreError::Internal(format!("{name} contains non-positive value {bad}")));
    }
    Ok(())
}

/// Fail fast if any rarity table is malformed.
///
/// Checks that rates sum to 100 and that cost, power, cap and bonus tables
/// hold five positive values with each cap reachable by at least one feed.
pub fn validate_tables() -> Result<(), CoreError> {
    let rate_total: u32 = BASE_RATES.as_slice().iter().sum();
    if BASE_RATES.as_slice().len() != RARITY_COUNT || rate_total != 100 {
        return Err(CoreError::Internal(format!(
            "BASE_RATES must hold {RARITY_COUNT} entries summing to 100, got {rate_total}"
        )));
    }

    check_positive("BASE_FEED_COST", &BASE_FEED_COST)?;
    check_positive("POWER_PER_FEED", &POWER_PER_FEED)?;
    check_positive("MAX_FED_POWER", &MAX_FED_POWER)?;
    check_positive("DUPLICATE_POWER_BONUS", &DUPLICATE_POWER_BONUS)?;

    for (rarity, cap) in MAX_FED_POWER.iter() {
        if cap < POWER_PER_FEED.get(rarity) {
            return Err(CoreError::Internal(format!(
                "MAX_FED_POWER for {rarity} is below one feed"
            )));
        }
    }
    Ok(())
}
