//! In-game currencies and balance checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The two soft currencies a user can spend on pulls.
///
/// CrunchCoin is bought with real money; Trickle Tokens drip in from daily
/// logins and achievements and are deliberately worse value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Currency {
    CrunchCoin,
    TrickleTokens,
}

impl Currency {
    /// Wire name (`crunchCoin` / `trickleTokens`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CrunchCoin => "crunchCoin",
            Self::TrickleTokens => "trickleTokens",
        }
    }

    /// Human-readable name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::CrunchCoin => "CrunchCoin",
            Self::TrickleTokens => "Trickle Tokens",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crunchCoin" => Ok(Self::CrunchCoin),
            "trickleTokens" => Ok(Self::TrickleTokens),
            other => Err(CoreError::Validation(format!(
                "Invalid currency '{other}'. Use 'crunchCoin' or 'trickleTokens'."
            ))),
        }
    }
}

/// Reject a spend that the balance cannot cover.
pub fn ensure_funds(currency: Currency, required: i64, available: i64) -> Result<(), CoreError> {
    if available < required {
        return Err(CoreError::InsufficientFunds {
            currency,
            required,
            available,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_wire_names() {
        assert_eq!("crunchCoin".parse::<Currency>().unwrap(), Currency::CrunchCoin);
        assert_eq!(
            "trickleTokens".parse::<Currency>().unwrap(),
            Currency::TrickleTokens
        );
        assert_matches!("gold".parse::<Currency>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn exact_balance_is_enough() {
        assert!(ensure_funds(Currency::CrunchCoin, 100, 100).is_ok());
    }

    #[test]
    fn short_balance_reports_required_and_available() {
        let err = ensure_funds(Currency::TrickleTokens, 500, 120).unwrap_err();
        assert_matches!(
            err,
            CoreError::InsufficientFunds {
                currency: Currency::TrickleTokens,
                required: 500,
                available: 120,
            }
        );
        assert_eq!(err.to_string(), "Not enough Trickle Tokens. Need 500, have 120.");
    }
}
