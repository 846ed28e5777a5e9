pub mod achievements;
pub mod battle;
pub mod buzzwords;
pub mod characters;
pub mod events;
pub mod gacha;
pub mod leaderboard;
pub mod payments;
pub mod user;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// A `Send` RNG seeded from the thread RNG, safe to hold across awaits.
pub(crate) fn request_rng() -> StdRng {
    StdRng::from_rng(&mut rand::rng())
}
