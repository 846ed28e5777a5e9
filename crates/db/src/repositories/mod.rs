//! Repository layer.

pub mod achievement_repo;
pub mod banner_repo;
pub mod battle_repo;
pub mod buzzword_repo;
pub mod character_repo;
pub mod leaderboard_repo;
pub mod seasonal_event_repo;
pub mod transaction_repo;
pub mod user_character_repo;
pub mod user_repo;

pub use achievement_repo::AchievementRepo;
pub use banner_repo::BannerRepo;
pub use battle_repo::BattleRepo;
pub use buzzword_repo::BuzzwordRepo;
pub use character_repo::CharacterRepo;
pub use leaderboard_repo::LeaderboardRepo;
pub use seasonal_event_repo::SeasonalEventRepo;
pub use transaction_repo::TransactionRepo;
pub use user_character_repo::UserCharacterRepo;
pub use user_repo::UserRepo;
