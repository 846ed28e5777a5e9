//! Character rarity (1★..5★) and the fixed per-rarity lookup tables.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of rarity tiers. Every [`RarityTable`] holds exactly this many entries.
pub const RARITY_COUNT: usize = 5;

/// A validated star rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rarity(u8);

impl Rarity {
    pub const COMMON: Rarity = Rarity(1);
    pub const UNCOMMON: Rarity = Rarity(2);
    pub const RARE: Rarity = Rarity(3);
    pub const SUPER_RARE: Rarity = Rarity(4);
    pub const LEGENDARY: Rarity = Rarity(5);

    /// All tiers in ascending order.
    pub const ALL: [Rarity; RARITY_COUNT] = [
        Self::COMMON,
        Self::UNCOMMON,
        Self::RARE,
        Self::SUPER_RARE,
        Self::LEGENDARY,
    ];

    /// Build a rarity from its star count, rejecting anything outside `1..=5`.
    pub fn new(stars: i32) -> Result<Self, CoreError> {
        match stars {
            1..=5 => Ok(Self(stars as u8)),
            other => Err(CoreError::Validation(format!(
                "Rarity must be between 1 and 5, got {other}"
            ))),
        }
    }

    /// Star count as stored in the database.
    pub fn stars(self) -> i32 {
        i32::from(self.0)
    }

    /// Zero-based table index.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Common",
            2 => "Uncommon",
            3 => "Rare",
            4 => "Super Rare",
            _ => "Legendary",
        }
    }
}

impl TryFrom<i32> for Rarity {
    type Error = CoreError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rarity> for i32 {
    fn from(value: Rarity) -> Self {
        value.stars()
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}★", self.0)
    }
}

/// Fixed lookup structure indexed by [`Rarity`].
///
/// The backing array makes "exactly five entries" a type-level fact for
/// compile-time tables; [`RarityTable::from_slice`] enforces it for tables
/// assembled at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RarityTable<T>([T; RARITY_COUNT]);

impl<T: Copy> RarityTable<T> {
    /// Build a table from values ordered 1★ through 5★.
    pub const fn new(values: [T; RARITY_COUNT]) -> Self {
        Self(values)
    }

    /// Build a table from a slice, failing unless it has exactly five entries.
    pub fn from_slice(values: &[T]) -> Result<Self, CoreError> {
        let array: [T; RARITY_COUNT] = values.try_into().map_err(|_| {
            CoreError::Validation(format!(
                "Rarity table must have exactly {RARITY_COUNT} entries, got {}",
                values.len()
            ))
        })?;
        Ok(Self(array))
    }

    pub fn get(&self, rarity: Rarity) -> T {
        self.0[rarity.index()]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Iterate `(rarity, value)` pairs in ascending rarity order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Rarity, T)> + '_ {
        Rarity::ALL.into_iter().map(move |r| (r, self.get(r)))
    }
}
