use std::sync::atomic::AtomicI32;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::SessionManager;
use trading_admin::config::PaginationConfig;
use trading_admin::domain::auth::service::Authenticator;
use trading_admin::domain::entity::errors::EntityError;
use trading_admin::domain::entity::models::Entity;
use trading_admin::domain::entity::ports::EntityRepository;
use trading_admin::domain::entity::service::EntityService;
use trading_admin::domain::user::models::UpsertUserCommand;
use trading_admin::domain::user::models::User;
use trading_admin::domain::user::ports::UserRepository;
use trading_admin::domain::user::service::UserService;
use trading_admin::inbound::http::router::create_router;
use trading_admin::inbound::http::router::AppState;

/// In-memory stand-in for a Postgres table: insertion-ordered records with
/// sequentially assigned ids.
pub struct InMemoryRepository<E> {
    records: Mutex<Vec<E>>,
    next_id: AtomicI32,
}

impl<E> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for InMemoryRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, EntityError> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn count(&self) -> Result<u64, EntityError> {
        Ok(self.records.lock().unwrap().len() as u64)
    }

    async fn find_slice(&self, limit: i64, offset: i64) -> Result<Vec<E>, EntityError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<E>, EntityError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|e| e.id() == Some(id)).cloned())
    }

    async fn insert(&self, mut entity: E) -> Result<E, EntityError> {
        entity.set_id(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.records.lock().unwrap().push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, EntityError> {
        let id = entity.id().ok_or_else(|| {
            EntityError::Database("update requires a record with an id".to_string())
        })?;

        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|e| e.id() == Some(id)) {
            Some(stored) => {
                *stored = entity.clone();
                Ok(entity)
            }
            None => Err(EntityError::NotFound {
                entity: E::NAME,
                id,
            }),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, EntityError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|e| e.id() != Some(id));
        Ok(records.len() < before)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, EntityError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().any(|e| e.id() == Some(id)))
    }
}

/// User table stand-in adding the username lookup.
pub struct InMemoryUserRepository {
    inner: InMemoryRepository<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            inner: InMemoryRepository::new(),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityRepository<User> for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, EntityError> {
        self.inner.find_all().await
    }

    async fn count(&self) -> Result<u64, EntityError> {
        self.inner.count().await
    }

    async fn find_slice(&self, limit: i64, offset: i64) -> Result<Vec<User>, EntityError> {
        self.inner.find_slice(limit, offset).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, EntityError> {
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, entity: User) -> Result<User, EntityError> {
        self.inner.insert(entity).await
    }

    async fn update(&self, entity: User) -> Result<User, EntityError> {
        self.inner.update(entity).await
    }

    async fn delete(&self, id: i32) -> Result<bool, EntityError> {
        self.inner.delete(id).await
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, EntityError> {
        self.inner.exists_by_id(id).await
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, EntityError> {
        let records = self.inner.records.lock().unwrap();
        Ok(records.iter().find(|u| u.username == username).cloned())
    }
}

/// Test application serving the full router over in-memory storage.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub state: AppState,
}

impl TestApp {
    /// Spawn the application on a random port and return TestApp.
    ///
    /// The client keeps cookies but never follows redirects, so tests can
    /// assert on Location headers directly.
    pub async fn spawn() -> Self {
        let user_repository: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());

        let state = AppState {
            bid_lists: Arc::new(EntityService::new(Arc::new(InMemoryRepository::new()))),
            curve_points: Arc::new(EntityService::new(Arc::new(InMemoryRepository::new()))),
            ratings: Arc::new(EntityService::new(Arc::new(InMemoryRepository::new()))),
            rule_names: Arc::new(EntityService::new(Arc::new(InMemoryRepository::new()))),
            trades: Arc::new(EntityService::new(Arc::new(InMemoryRepository::new()))),
            users: Arc::new(UserService::new(
                Arc::clone(&user_repository),
                PasswordHasher::new(),
            )),
            authenticator: Arc::new(Authenticator::new(
                Arc::clone(&user_repository),
                PasswordHasher::new(),
            )),
            sessions: Arc::new(SessionManager::new(
                b"test-secret-key-for-session-signing-at-least-32-bytes",
                8,
            )),
            pagination: PaginationConfig {
                default_page_size: 5,
                max_page_size: 10,
            },
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to create reqwest client"),
            state,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Insert a user account directly through the service, hashing the
    /// given plaintext password.
    pub async fn seed_user(&self, username: &str, password: &str, role: &str) -> User {
        self.state
            .users
            .insert(UpsertUserCommand {
                username: username.to_string(),
                password: password.to_string(),
                fullname: format!("{username} (test)"),
                role: role.to_string(),
            })
            .await
            .expect("Failed to seed user")
    }

    /// Submit the login form; the session cookie lands in the client's
    /// cookie store.
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute login request")
    }
}

/// Location header of a redirect response.
pub fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get("location")
        .expect("Expected a Location header")
        .to_str()
        .expect("Location header was not valid UTF-8")
}
