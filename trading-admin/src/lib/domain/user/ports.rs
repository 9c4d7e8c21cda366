use async_trait::async_trait;

use crate::domain::entity::errors::EntityError;
use crate::domain::entity::ports::EntityRepository;
use crate::domain::user::models::User;

/// Persistence port for user accounts: the shared entity operations plus
/// the exact-username lookup the authenticator needs.
#[async_trait]
pub trait UserRepository: EntityRepository<User> {
    /// Retrieve a user by exact username match (None when absent).
    ///
    /// # Errors
    /// * `Database` - storage operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, EntityError>;
}
