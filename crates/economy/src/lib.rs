//! Transactional economy operations.
//!
//! Each public operation opens one database transaction, locks the acting
//! user's row, runs the pure rules from `crunch_core`, writes every mutation
//! and commits. Nothing is written if any step fails.

pub mod achievements;
pub mod battle;
pub mod buzzwords;
pub mod daily_login;
pub mod error;
pub mod events;
pub mod feed;
pub mod gacha;
pub mod leaderboard;
pub mod payments;
pub mod profile;

pub use error::{EconomyError, EconomyResult};
