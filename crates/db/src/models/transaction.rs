//! Real-money payment ledger.

use crunch_core::error::CoreError;
use crunch_core::payments::TransactionStatus;
use crunch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `transactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: DbId,
    pub user_id: DbId,
    pub package_id: String,
    pub amount_cents: i64,
    pub crunch_coin_granted: i64,
    pub status: String,
    pub payment_reference: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Transaction {
    pub fn status(&self) -> Result<TransactionStatus, CoreError> {
        self.status.parse()
    }
}

/// DTO for recording a pending checkout.
#[derive(Debug, Clone)]
pub struct CreateTransaction {
    pub user_id: DbId,
    pub package_id: String,
    pub amount_cents: i64,
    pub crunch_coin_granted: i64,
}
