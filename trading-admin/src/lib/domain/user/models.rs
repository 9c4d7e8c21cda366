use sqlx::FromRow;

use crate::domain::entity::models::Entity;

/// An application account.
///
/// `password_hash` only ever holds the Argon2 PHC string; the plaintext
/// supplied on insert or update is hashed before the record is built and
/// is never persisted.
#[derive(Debug, Clone, PartialEq, Default, FromRow)]
pub struct User {
    pub id: Option<i32>,
    pub username: String,
    pub password_hash: String,
    pub fullname: String,
    pub role: String,
}

impl Entity for User {
    const NAME: &'static str = "user";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }
}

/// Command to create a new user. The password is plaintext here and is
/// hashed by the service before anything touches storage.
#[derive(Debug, Clone)]
pub struct UpsertUserCommand {
    pub username: String,
    /// Plaintext password. On update, an empty string means "keep the
    /// stored hash unchanged".
    pub password: String,
    pub fullname: String,
    pub role: String,
}
