use thiserror::Error;

/// Error type for session token operations.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("failed to sign session token: {0}")]
    SigningFailed(String),

    #[error("session token is expired")]
    Expired,

    #[error("session token is invalid: {0}")]
    Invalid(String),
}
