use std::sync::Arc;

use auth::PasswordHasher;

use crate::domain::page::Page;
use crate::domain::page::PageRequest;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UpsertUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;

/// User management service.
///
/// The one entity with true update semantics: an update that carries an
/// empty password leaves the stored hash untouched, and the stored hash
/// itself is never fed back through the hasher.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    password_hasher: PasswordHasher,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    pub async fn find_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn find_paginated(&self, request: PageRequest) -> Result<Page<User>, UserError> {
        let total = self.repository.count().await?;
        let content = self
            .repository
            .find_slice(request.limit(), request.offset())
            .await?;

        Ok(Page::new(content, request, total))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        Ok(self.repository.find_by_username(username).await?)
    }

    /// Create a new account; the supplied plaintext is hashed here.
    pub async fn insert(&self, command: UpsertUserCommand) -> Result<User, UserError> {
        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| UserError::Hashing(e.to_string()))?;

        let user = User {
            id: None,
            username: command.username,
            password_hash,
            fullname: command.fullname,
            role: command.role,
        };

        let stored = self.repository.insert(user).await?;
        tracing::info!(id = stored.id, username = %stored.username, "user created");
        Ok(stored)
    }

    /// Update an existing account.
    ///
    /// Username, full name and role are overwritten; the password hash is
    /// replaced only when the command carries a non-empty new password.
    pub async fn update(&self, id: i32, command: UpsertUserCommand) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        user.username = command.username;
        user.fullname = command.fullname;
        user.role = command.role;

        if !command.password.is_empty() {
            user.password_hash = self
                .password_hasher
                .hash(&command.password)
                .map_err(|e| UserError::Hashing(e.to_string()))?;
        }

        let stored = self.repository.update(user).await?;
        tracing::info!(id, username = %stored.username, "user updated");
        Ok(stored)
    }

    /// Delete by id; deleting an absent id is a no-op.
    pub async fn delete_by_id(&self, id: i32) -> Result<(), UserError> {
        let removed = self.repository.delete(id).await?;
        if removed {
            tracing::info!(id, "user deleted");
        }
        Ok(())
    }

    pub async fn exists_by_id(&self, id: i32) -> Result<bool, UserError> {
        Ok(self.repository.exists_by_id(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::entity::errors::EntityError;
    use crate::domain::entity::ports::EntityRepository;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl EntityRepository<User> for TestUserRepository {
            async fn find_all(&self) -> Result<Vec<User>, EntityError>;
            async fn count(&self) -> Result<u64, EntityError>;
            async fn find_slice(&self, limit: i64, offset: i64) -> Result<Vec<User>, EntityError>;
            async fn find_by_id(&self, id: i32) -> Result<Option<User>, EntityError>;
            async fn insert(&self, entity: User) -> Result<User, EntityError>;
            async fn update(&self, entity: User) -> Result<User, EntityError>;
            async fn delete(&self, id: i32) -> Result<bool, EntityError>;
            async fn exists_by_id(&self, id: i32) -> Result<bool, EntityError>;
        }

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn find_by_username(&self, username: &str) -> Result<Option<User>, EntityError>;
        }
    }

    fn command(username: &str, password: &str) -> UpsertUserCommand {
        UpsertUserCommand {
            username: username.to_string(),
            password: password.to_string(),
            fullname: "Test User".to_string(),
            role: "USER".to_string(),
        }
    }

    fn service(repository: MockTestUserRepository) -> UserService {
        UserService::new(Arc::new(repository), PasswordHasher::new())
    }

    #[tokio::test]
    async fn insert_hashes_the_password() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_insert()
            .withf(|user| {
                user.username == "toto"
                    && user.password_hash.starts_with("$argon2")
                    && user.password_hash != "123456"
            })
            .times(1)
            .returning(|mut user| {
                user.id = Some(1);
                Ok(user)
            });

        let stored = service(repository).insert(command("toto", "123456")).await.unwrap();

        assert_eq!(stored.id, Some(1));
        let hasher = PasswordHasher::new();
        assert!(hasher.verify("123456", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn update_with_empty_password_keeps_the_stored_hash() {
        let existing_hash = PasswordHasher::new().hash("123456").unwrap();
        let existing = User {
            id: Some(1),
            username: "toto".to_string(),
            password_hash: existing_hash.clone(),
            fullname: "Old Name".to_string(),
            role: "USER".to_string(),
        };

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .with(eq(1))
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        let expected_hash = existing_hash.clone();
        repository
            .expect_update()
            .withf(move |user| {
                user.password_hash == expected_hash && user.fullname == "Test User"
            })
            .times(1)
            .returning(Ok);

        let stored = service(repository).update(1, command("toto", "")).await.unwrap();
        assert_eq!(stored.password_hash, existing_hash);
    }

    #[tokio::test]
    async fn update_with_new_password_rehashes() {
        let existing = User {
            id: Some(1),
            username: "toto".to_string(),
            password_hash: PasswordHasher::new().hash("old-pw").unwrap(),
            fullname: "Test User".to_string(),
            role: "USER".to_string(),
        };
        let old_hash = existing.password_hash.clone();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(move |user| user.password_hash != old_hash)
            .times(1)
            .returning(Ok);

        let stored = service(repository)
            .update(1, command("toto", "new-pw"))
            .await
            .unwrap();
        assert!(PasswordHasher::new()
            .verify("new-pw", &stored.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repository).update(99, command("toto", "pw")).await;
        assert!(matches!(result, Err(UserError::NotFound(99))));
    }

    #[tokio::test]
    async fn delete_of_absent_user_is_a_no_op() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_delete()
            .with(eq(42))
            .times(1)
            .returning(|_| Ok(false));
        repository
            .expect_exists_by_id()
            .with(eq(42))
            .returning(|_| Ok(false));

        let service = service(repository);
        assert!(service.delete_by_id(42).await.is_ok());
        assert!(!service.exists_by_id(42).await.unwrap());
    }
}
