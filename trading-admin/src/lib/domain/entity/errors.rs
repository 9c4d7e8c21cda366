use thiserror::Error;

/// Error type shared by all entity CRUD operations.
#[derive(Debug, Clone, Error)]
pub enum EntityError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i32 },

    #[error("database error: {0}")]
    Database(String),
}
