//! CrunchCoin packages, payment ledger state machine, and webhook signatures.

use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Packages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinPackage {
    pub id: &'static str,
    pub name: &'static str,
    pub price_cents: i64,
    pub crunch_coin: i64,
    pub tagline: &'static str,
}

pub const PACKAGES: [CoinPackage; 5] = [
    CoinPackage {
        id: "seed_round",
        name: "Seed Round",
        price_cents: 499,
        crunch_coin: 500,
        tagline: "Your first bad decision.",
    },
    CoinPackage {
        id: "series_a",
        name: "Series A",
        price_cents: 999,
        crunch_coin: 900,
        tagline: "Now with institutional backing (yours).",
    },
    CoinPackage {
        id: "series_b",
        name: "Series B",
        price_cents: 2499,
        crunch_coin: 2000,
        tagline: "Throwing good money after bad.",
    },
    CoinPackage {
        id: "ipo",
        name: "IPO",
        price_cents: 4999,
        crunch_coin: 3500,
        tagline: "Going public with your poor choices.",
    },
    CoinPackage {
        id: "hostile_takeover",
        name: "Hostile Takeover",
        price_cents: 9999,
        crunch_coin: 6000,
        tagline: "You just acquired nothing of value.",
    },
];

pub fn find_package(id: &str) -> Result<&'static CoinPackage, CoreError> {
    PACKAGES
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| CoreError::Validation(format!("Unknown package '{id}'")))
}

// ---------------------------------------------------------------------------
// Transaction status
// ---------------------------------------------------------------------------

/// Stored as upper-case text in `transactions.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl TransactionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Refunded => "REFUNDED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "COMPLETED" => Ok(Self::Completed),
            "FAILED" => Ok(Self::Failed),
            "REFUNDED" => Ok(Self::Refunded),
            other => Err(CoreError::Internal(format!(
                "Unknown transaction status '{other}'"
            ))),
        }
    }
}

/// Ledger actions driven by gateway events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerAction {
    Complete,
    Expire,
    Refund,
}

/// Status after applying `action`, or `None` if the transition is not allowed.
///
/// Only `PENDING -> COMPLETED | FAILED` and `COMPLETED -> REFUNDED` move;
/// every other combination is a no-op, so re-delivered events change nothing.
pub fn next_status(current: TransactionStatus, action: LedgerAction) -> Option<TransactionStatus> {
    use TransactionStatus::*;
    match (current, action) {
        (Pending, LedgerAction::Complete) => Some(Completed),
        (Pending, LedgerAction::Expire) => Some(Failed),
        (Completed, LedgerAction::Refund) => Some(Refunded),
        _ => None,
    }
}

/// CrunchCoin actually removed on refund; balances never go negative.
pub fn refund_debit(balance: i64, granted: i64) -> i64 {
    granted.min(balance).max(0)
}

// ---------------------------------------------------------------------------
// Webhook events
// ---------------------------------------------------------------------------

/// Payment gateway event, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum WebhookEvent {
    #[serde(rename = "checkout.completed", rename_all = "camelCase")]
    CheckoutCompleted {
        transaction_id: DbId,
        payment_reference: String,
    },
    #[serde(rename = "checkout.expired", rename_all = "camelCase")]
    CheckoutExpired { transaction_id: DbId },
    #[serde(rename = "charge.refunded", rename_all = "camelCase")]
    ChargeRefunded { payment_reference: String },
    #[serde(other)]
    Unknown,
}

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

type HmacSha256 = Hmac<Sha256>;

/// Name of the header carrying `t=<unix>,v1=<hex>`.
pub const SIGNATURE_HEADER: &str = "payment-signature";

fn mac_for(secret: &str, timestamp: i64, body: &[u8]) -> Result<HmacSha256, CoreError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| CoreError::Internal(format!("HMAC key rejected: {e}")))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(body);
    Ok(mac)
}

/// Build a signature header value for `body` at `timestamp`.
pub fn sign_payload(secret: &str, timestamp: i64, body: &[u8]) -> Result<String, CoreError> {
    let mac = mac_for(secret, timestamp, body)?;
    let signature = hex::encode(mac.finalize().into_bytes());
    Ok(format!("t={timestamp},v1={signature}"))
}

fn parse_header(header: &str) -> Option<(i64, &str)> {
    let mut timestamp = None;
    let mut signature = None;
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", v)) => timestamp = v.parse::<i64>().ok(),
            Some(("v1", v)) => signature = Some(v),
            _ => {}
        }
    }
    Some((timestamp?, signature?))
}

/// Check a webhook signature header against the raw body.
///
/// Rejects malformed headers, timestamps more than `tolerance_secs` away from
/// `now_unix`, and signatures that don't match.
pub fn verify_signature(
    secret: &str,
    header: &str,
    body: &[u8],
    now_unix: i64,
    tolerance_secs: i64,
) -> Result<(), CoreError> {
    let (timestamp, signature) = parse_header(header)
        .ok_or_else(|| CoreError::Unauthorized("Malformed payment signature".to_string()))?;

    if now_unix.abs_diff(timestamp) > tolerance_secs.unsigned_abs() {
        return Err(CoreError::Unauthorized(
            "Payment signature timestamp outside tolerance".to_string(),
        ));
    }

    let expected = hex::decode(signature)
        .ok_or_else(|| CoreError::Unauthorized("Malformed payment signature".to_string()))?;

    mac_for(secret, timestamp, body)?
        .verify_slice(&expected)
        .map_err(|_| CoreError::Unauthorized("Invalid payment signature".to_string()))
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    pub fn decode(s: &str) -> Option<Vec<u8>> {
        if s.len() % 2 != 0 {
            return None;
        }
        (0..s.len())
            .step_by(2)
            .map(|i| s.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SECRET: &str = "whsec_test";
    const BODY: &[u8] = br#"{"type":"checkout.completed","transactionId":1,"paymentReference":"pi_1"}"#;

    // -- Packages --

    #[test]
    fn packages_are_priced_in_ascending_order() {
        for pair in PACKAGES.windows(2) {
            assert!(pair[0].price_cents < pair[1].price_cents);
            assert!(pair[0].crunch_coin < pair[1].crunch_coin);
        }
        assert_eq!(find_package("ipo").unwrap().crunch_coin, 3500);
        assert_matches!(find_package("pre_seed"), Err(CoreError::Validation(_)));
    }

    // -- Status machine --

    #[test]
    fn pending_can_complete_or_fail() {
        assert_eq!(
            next_status(TransactionStatus::Pending, LedgerAction::Complete),
            Some(TransactionStatus::Completed)
        );
        assert_eq!(
            next_status(TransactionStatus::Pending, LedgerAction::Expire),
            Some(TransactionStatus::Failed)
        );
    }

    #[test]
    fn redelivery_is_a_no_op() {
        assert_eq!(next_status(TransactionStatus::Completed, LedgerAction::Complete), None);
        assert_eq!(next_status(TransactionStatus::Refunded, LedgerAction::Refund), None);
        assert_eq!(next_status(TransactionStatus::Failed, LedgerAction::Complete), None);
        assert_eq!(next_status(TransactionStatus::Pending, LedgerAction::Refund), None);
    }

    #[test]
    fn refund_never_overdraws() {
        assert_eq!(refund_debit(1000, 500), 500);
        assert_eq!(refund_debit(120, 500), 120);
        assert_eq!(refund_debit(0, 500), 0);
    }

    // -- Events --

    #[test]
    fn parses_known_events() {
        let event: WebhookEvent = serde_json::from_slice(BODY).unwrap();
        assert_eq!(
            event,
            WebhookEvent::CheckoutCompleted {
                transaction_id: 1,
                payment_reference: "pi_1".to_string(),
            }
        );
        let event: WebhookEvent =
            serde_json::from_str(r#"{"type":"charge.refunded","paymentReference":"pi_1"}"#).unwrap();
        assert_matches!(event, WebhookEvent::ChargeRefunded { .. });
    }

    #[test]
    fn unknown_event_types_are_tolerated() {
        let event: WebhookEvent =
            serde_json::from_str(r#"{"type":"customer.created","id":"cus_1"}"#).unwrap();
        assert_eq!(event, WebhookEvent::Unknown);
    }

    // -- Signatures --

    #[test]
    fn signed_payload_verifies() {
        let header = sign_payload(SECRET, 1_700_000_000, BODY).unwrap();
        assert!(header.starts_with("t=1700000000,v1="));
        assert!(verify_signature(SECRET, &header, BODY, 1_700_000_010, 300).is_ok());
    }

    #[test]
    fn tampered_body_is_rejected() {
        let header = sign_payload(SECRET, 1_700_000_000, BODY).unwrap();
        assert_matches!(
            verify_signature(SECRET, &header, b"{}", 1_700_000_000, 300),
            Err(CoreError::Unauthorized(_))
        );
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let header = sign_payload("other", 1_700_000_000, BODY).unwrap();
        assert_matches!(
            verify_signature(SECRET, &header, BODY, 1_700_000_000, 300),
            Err(CoreError::Unauthorized(_))
        );
    }

    #[test]
    fn stale_timestamp_is_rejected() {
        let header = sign_payload(SECRET, 1_700_000_000, BODY).unwrap();
        assert_matches!(
            verify_signature(SECRET, &header, BODY, 1_700_000_301, 300),
            Err(CoreError::Unauthorized(_))
        );
    }

    #[test]
    fn extreme_timestamps_are_rejected() {
        for timestamp in [i64::MIN, i64::MAX] {
            let header = format!("t={timestamp},v1=00");
            assert_matches!(
                verify_signature(SECRET, &header, b"{}", 1_700_000_000, 300),
                Err(CoreError::Unauthorized(_))
            );
        }
        assert_matches!(
            verify_signature(SECRET, "t=0,v1=00", b"{}", i64::MIN, 300),
            Err(CoreError::Unauthorized(_))
        );
    }

    #[test]
    fn malformed_header_is_rejected() {
        for header in ["", "t=abc,v1=00", "v1=deadbeef", "t=1700000000,v1=zz"] {
            assert_matches!(
                verify_signature(SECRET, header, BODY, 1_700_000_000, 300),
                Err(CoreError::Unauthorized(_)),
                "header {header:?} accepted"
            );
        }
    }
}
