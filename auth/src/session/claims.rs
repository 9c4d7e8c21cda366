use serde::Deserialize;
use serde::Serialize;

/// Payload of a signed session token.
///
/// One fixed shape for the whole application: the authenticated username,
/// the single role copied verbatim from the stored user record, and the
/// issue/expiry timestamps (Unix seconds).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Authenticated username.
    pub sub: String,
    /// Role string, exactly as stored on the user record.
    pub role: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}
