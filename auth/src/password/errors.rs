use thiserror::Error;

/// Error type for password hashing and verification.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    HashingFailed(String),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}
