use crunch_core::error::CoreError;
use crunch_core::types::DbId;

/// Failure of an economy operation: a broken business rule or a store error.
#[derive(Debug, thiserror::Error)]
pub enum EconomyError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type EconomyResult<T> = Result<T, EconomyError>;

pub(crate) fn user_not_found(id: DbId) -> EconomyError {
    CoreError::NotFound { entity: "User", id }.into()
}
