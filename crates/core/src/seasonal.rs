//! Seasonal event modifiers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Adds `value` percent to the 5★ pull rate.
    RateBoost,
    /// Multiplies daily-login Trickle Token rewards by `value`.
    DoubleTokens,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RateBoost => "rate_boost",
            Self::DoubleTokens => "double_tokens",
        }
    }
}

impl FromStr for EventType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rate_boost" => Ok(Self::RateBoost),
            "double_tokens" => Ok(Self::DoubleTokens),
            other => Err(CoreError::Validation(format!("Unknown event type '{other}'"))),
        }
    }
}

/// Value of the first active event of `kind`, or 0.
pub fn event_modifier<'a, I>(events: I, kind: EventType) -> i32
where
    I: IntoIterator<Item = (&'a str, i32)>,
{
    find_value(events, kind).unwrap_or(0)
}

/// Value of the first active event of `kind`, or 1.
pub fn event_multiplier<'a, I>(events: I, kind: EventType) -> i32
where
    I: IntoIterator<Item = (&'a str, i32)>,
{
    find_value(events, kind).unwrap_or(1)
}

fn find_value<'a, I>(events: I, kind: EventType) -> Option<i32>
where
    I: IntoIterator<Item = (&'a str, i32)>,
{
    events
        .into_iter()
        .find(|(event_type, _)| *event_type == kind.as_str())
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_event_is_active() {
        let none: [(&str, i32); 0] = [];
        assert_eq!(event_modifier(none, EventType::RateBoost), 0);
        assert_eq!(event_multiplier(none, EventType::DoubleTokens), 1);
    }

    #[test]
    fn first_matching_event_wins() {
        let events = [("double_tokens", 2), ("rate_boost", 3), ("rate_boost", 9)];
        assert_eq!(event_modifier(events, EventType::RateBoost), 3);
        assert_eq!(event_multiplier(events, EventType::DoubleTokens), 2);
    }

    #[test]
    fn parses_event_types() {
        assert_eq!("rate_boost".parse::<EventType>().unwrap(), EventType::RateBoost);
        assert!("free_money".parse::<EventType>().is_err());
    }
}
