use thiserror::Error;

/// Authentication failures.
///
/// `UnknownUser` and `BadCredentials` are distinct for logging but must be
/// collapsed into one generic message at the login surface, so a caller
/// can never learn which half of the credential pair was wrong.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("unknown user")]
    UnknownUser,

    #[error("bad credentials")]
    BadCredentials,

    #[error("stored credentials are unverifiable: {0}")]
    Unverifiable(String),

    #[error("database error: {0}")]
    Database(String),
}
