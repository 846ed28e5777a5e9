//! Row structs and insert DTOs.
//!
//! Each submodule holds a `FromRow` + `Serialize` struct per table or join,
//! plus `Create*` DTOs where rows are inserted from outside the repository.

pub mod achievement;
pub mod banner;
pub mod battle;
pub mod buzzword;
pub mod character;
pub mod leaderboard;
pub mod seasonal_event;
pub mod transaction;
pub mod user;
pub mod user_character;
