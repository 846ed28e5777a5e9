#![allow(dead_code)]

use crunch_core::types::DbId;
use crunch_db::models::character::Character;
use crunch_db::models::user::{CreateUser, PullStateUpdate};
use crunch_db::repositories::{CharacterRepo, UserCharacterRepo, UserRepo};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::PgPool;

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A user with the given balances and no characters.
pub async fn player(pool: &PgPool, crunch_coin: i64, trickle_tokens: i64) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            display_name: Some("Test Founder".to_string()),
            crunch_coin: Some(crunch_coin),
            trickle_tokens: Some(trickle_tokens),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn first_of_rarity(pool: &PgPool, rarity: i32) -> Character {
    CharacterRepo::list_by_rarity(pool, rarity).await.unwrap().remove(0)
}

/// Give `user_id` the first catalogue character of `rarity`. Returns the ownership id.
pub async fn give_character(pool: &PgPool, user_id: DbId, rarity: i32) -> DbId {
    let character = first_of_rarity(pool, rarity).await;
    UserCharacterRepo::create(pool, user_id, character.id)
        .await
        .unwrap()
        .id
}

pub async fn set_pity(pool: &PgPool, user_id: DbId, pity_counter: i32, guaranteed_banner: bool) {
    UserRepo::record_pulls(
        pool,
        user_id,
        &PullStateUpdate {
            pity_counter,
            guaranteed_banner,
            pulls_made: 0,
            consume_weekly_free_pull: false,
        },
    )
    .await
    .unwrap();
}

pub async fn balances(pool: &PgPool, user_id: DbId) -> (i64, i64) {
    let user = UserRepo::find_by_id(pool, user_id).await.unwrap().unwrap();
    (user.crunch_coin, user.trickle_tokens)
}
