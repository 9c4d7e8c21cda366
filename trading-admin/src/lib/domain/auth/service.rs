use std::sync::Arc;

use auth::PasswordHasher;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Principal;
use crate::domain::user::ports::UserRepository;

/// Verifies username/password pairs against the credential store.
///
/// Dependencies are injected explicitly; there is no ambient security
/// context. No lockout and no rate limiting, by design: the only side
/// effect of a failed attempt is a log line.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    password_hasher: PasswordHasher,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, password_hasher: PasswordHasher) -> Self {
        Self {
            users,
            password_hasher,
        }
    }

    /// Verify a credential pair, producing the session principal.
    ///
    /// The returned principal carries the role string exactly as stored.
    ///
    /// # Errors
    /// * `UnknownUser` - no user with this exact username
    /// * `BadCredentials` - password does not match the stored hash
    /// * `Unverifiable` - the stored hash could not be parsed
    /// * `Database` - credential store lookup failed
    pub async fn authenticate(
        &self,
        username: &str,
        raw_password: &str,
    ) -> Result<Principal, AuthError> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?
            .ok_or_else(|| {
                tracing::warn!(username, "login attempt for unknown user");
                AuthError::UnknownUser
            })?;

        let matches = self
            .password_hasher
            .verify(raw_password, &user.password_hash)
            .map_err(|e| AuthError::Unverifiable(e.to_string()))?;

        if !matches {
            tracing::warn!(username, "login attempt with bad password");
            return Err(AuthError::BadCredentials);
        }

        tracing::info!(username, role = %user.role, "authentication succeeded");
        Ok(Principal {
            username: user.username,
            role: user.role,
        })
    }
}
