use async_trait::async_trait;

use crate::domain::entity::errors::EntityError;
use crate::domain::entity::models::Entity;

/// Persistence port shared by the five business entities.
///
/// Implementations must return rows in a stable, deterministic order
/// (storage order by id) so that pagination reproduces the full set
/// exactly once across consecutive pages of unchanged data.
#[async_trait]
pub trait EntityRepository<E: Entity>: Send + Sync + 'static {
    /// Retrieve every stored record in id order.
    ///
    /// # Errors
    /// * `Database` - storage operation failed
    async fn find_all(&self) -> Result<Vec<E>, EntityError>;

    /// Count all stored records.
    ///
    /// # Errors
    /// * `Database` - storage operation failed
    async fn count(&self) -> Result<u64, EntityError>;

    /// Retrieve one id-ordered slice of records.
    ///
    /// # Arguments
    /// * `limit` - maximum number of rows
    /// * `offset` - rows to skip before the slice starts
    ///
    /// # Errors
    /// * `Database` - storage operation failed
    async fn find_slice(&self, limit: i64, offset: i64) -> Result<Vec<E>, EntityError>;

    /// Retrieve a record by id (None when absent).
    ///
    /// # Errors
    /// * `Database` - storage operation failed
    async fn find_by_id(&self, id: i32) -> Result<Option<E>, EntityError>;

    /// Persist a new record, returning it with its generated id.
    ///
    /// # Errors
    /// * `Database` - storage operation failed
    async fn insert(&self, entity: E) -> Result<E, EntityError>;

    /// Overwrite the record addressed by the entity's id.
    ///
    /// # Errors
    /// * `NotFound` - no record with this id exists
    /// * `Database` - storage operation failed
    async fn update(&self, entity: E) -> Result<E, EntityError>;

    /// Remove a record by id. Returns whether a record was removed;
    /// deleting an absent id is not an error.
    ///
    /// # Errors
    /// * `Database` - storage operation failed
    async fn delete(&self, id: i32) -> Result<bool, EntityError>;

    /// Check whether a record with this id exists.
    ///
    /// # Errors
    /// * `Database` - storage operation failed
    async fn exists_by_id(&self, id: i32) -> Result<bool, EntityError>;
}
