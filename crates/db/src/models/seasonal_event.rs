//! Seasonal events.

use crunch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `seasonal_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalEvent {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub event_type: String,
    pub value: i32,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

/// DTO for scheduling an event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSeasonalEvent {
    pub name: String,
    pub description: Option<String>,
    pub event_type: String,
    pub value: i32,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

/// `(event_type, value)` pairs in the shape the modifier helpers expect.
pub fn modifiers(events: &[SeasonalEvent]) -> impl Iterator<Item = (&str, i32)> + '_ {
    events.iter().map(|e| (e.event_type.as_str(), e.value))
}
