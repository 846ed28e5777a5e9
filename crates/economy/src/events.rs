//! Active seasonal events and the modifiers they contribute.

use crunch_core::seasonal::{event_modifier, event_multiplier, EventType};
use crunch_core::types::Timestamp;
use crunch_db::models::seasonal_event::{modifiers, SeasonalEvent};
use crunch_db::repositories::SeasonalEventRepo;
use sqlx::{PgExecutor, PgPool};

use crate::error::EconomyResult;

/// Events whose window contains `now`.
pub async fn active_events(pool: &PgPool, now: Timestamp) -> EconomyResult<Vec<SeasonalEvent>> {
    Ok(SeasonalEventRepo::list_active(pool, now).await?)
}

/// Extra 5★ percent from an active `rate_boost` event.
pub(crate) async fn rate_boost_percent<'e, E>(executor: E, now: Timestamp) -> EconomyResult<i32>
where
    E: PgExecutor<'e>,
{
    let events = SeasonalEventRepo::list_active(executor, now).await?;
    Ok(event_modifier(modifiers(&events), EventType::RateBoost))
}

/// Daily-login reward multiplier from an active `double_tokens` event.
pub(crate) async fn token_multiplier<'e, E>(executor: E, now: Timestamp) -> EconomyResult<i32>
where
    E: PgExecutor<'e>,
{
    let events = SeasonalEventRepo::list_active(executor, now).await?;
    Ok(event_multiplier(modifiers(&events), EventType::DoubleTokens))
}
