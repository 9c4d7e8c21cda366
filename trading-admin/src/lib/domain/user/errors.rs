use thiserror::Error;

use crate::domain::entity::errors::EntityError;

/// Error type for user management operations.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("user not found: {0}")]
    NotFound(i32),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<EntityError> for UserError {
    fn from(err: EntityError) -> Self {
        match err {
            EntityError::NotFound { id, .. } => UserError::NotFound(id),
            EntityError::Database(msg) => UserError::Database(msg),
        }
    }
}
