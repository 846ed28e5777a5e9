//! Repository for `seasonal_events`.

use crunch_core::types::Timestamp;
use sqlx::{PgExecutor, PgPool};

use crate::models::seasonal_event::{CreateSeasonalEvent, SeasonalEvent};

const COLUMNS: &str = "id, name, description, event_type, value, start_date, end_date";

pub struct SeasonalEventRepo;

impl SeasonalEventRepo {
    pub async fn create(pool: &PgPool, input: &CreateSeasonalEvent) -> Result<SeasonalEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO seasonal_events (name, description, event_type, value, start_date, end_date)
             VALUES ($1, COALESCE($2, ''), $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SeasonalEvent>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.event_type)
            .bind(input.value)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Events whose `[start_date, end_date)` window contains `now`, oldest first.
    pub async fn list_active<'e, E>(executor: E, now: Timestamp) -> Result<Vec<SeasonalEvent>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM seasonal_events
             WHERE start_date <= $1 AND end_date > $1
             ORDER BY start_date ASC, id ASC"
        );
        sqlx::query_as::<_, SeasonalEvent>(&query)
            .bind(now)
            .fetch_all(executor)
            .await
    }
}
