//! Domain logic for the CrunchCoin gacha economy.
//!
//! Everything in this crate is pure: constant tables, roll algorithms,
//! cost formulas and the error taxonomy. Persistence and transactions live
//! in `crunch-db` and `crunch-economy`.

pub mod achievements;
pub mod banner;
pub mod battle;
pub mod buzzword;
pub mod currency;
pub mod daily_login;
pub mod error;
pub mod feed;
pub mod gacha;
pub mod leaderboard;
pub mod payments;
pub mod profile;
pub mod rarity;
pub mod rounding;
pub mod seasonal;
pub mod tables;
pub mod types;
