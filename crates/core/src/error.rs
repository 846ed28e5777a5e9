use crate::currency::Currency;
use crate::types::DbId;

/// Domain error taxonomy shared by every economy operation.
///
/// Business-rule failures are ordinary values of this type; only
/// `Internal` represents something unexpected.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("You don't own this {0}.")]
    NotOwned(&'static str),

    #[error("Not enough {currency}. Need {required}, have {available}.")]
    InsufficientFunds {
        currency: Currency,
        required: i64,
        available: i64,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Character is already fully fed.")]
    AlreadyMaxed,

    #[error("Cooldown active. Wait {remaining_secs}s before your next battle.")]
    CooldownActive { remaining_secs: i64 },

    #[error("No opponents found. The arena is empty.")]
    NoOpponents,

    #[error("You need at least one character to battle. Try pulling from the gacha first.")]
    NoCharacters,

    #[error("Your total power is 0. Feed your characters first.")]
    ZeroPower,

    #[error("Too many requests. Retry in {retry_after_secs}s.")]
    RateLimited { retry_after_secs: u64 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
