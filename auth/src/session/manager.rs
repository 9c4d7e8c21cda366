use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::SessionError;

/// Issues and verifies signed session tokens.
///
/// Tokens are HMAC-SHA256 signed and carry a fixed expiry set at issue
/// time. The secret should be at least 32 bytes and come from
/// configuration, never from source.
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validity_hours: i64,
}

impl SessionManager {
    pub fn new(secret: &[u8], validity_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            validity_hours,
        }
    }

    /// Issue a session token for an authenticated principal.
    ///
    /// # Errors
    /// * `SigningFailed` - token encoding failed
    pub fn issue(&self, username: &str, role: &str) -> Result<String, SessionError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: username.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.validity_hours)).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| SessionError::SigningFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// # Errors
    /// * `Expired` - the token's exp is in the past
    /// * `Invalid` - bad signature or malformed token
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let validation = Validation::new(self.algorithm);

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::Invalid(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_verify() {
        let sessions = SessionManager::new(b"test_secret_key_at_least_32_bytes!", 8);

        let token = sessions.issue("toto", "USER").expect("issue failed");
        let claims = sessions.verify(&token).expect("verify failed");

        assert_eq!(claims.sub, "toto");
        assert_eq!(claims.role, "USER");
        assert_eq!(claims.exp - claims.iat, 8 * 60 * 60);
    }

    #[test]
    fn verify_rejects_garbage() {
        let sessions = SessionManager::new(b"test_secret_key_at_least_32_bytes!", 8);
        assert!(sessions.verify("not.a.token").is_err());
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let issuer = SessionManager::new(b"secret_one_at_least_32_bytes_long!", 8);
        let other = SessionManager::new(b"secret_two_at_least_32_bytes_long!", 8);

        let token = issuer.issue("admin", "ADMIN").unwrap();
        assert!(matches!(other.verify(&token), Err(SessionError::Invalid(_))));
    }

    #[test]
    fn verify_rejects_expired_token() {
        // Negative validity produces a token that is already expired.
        let sessions = SessionManager::new(b"test_secret_key_at_least_32_bytes!", -1);

        let token = sessions.issue("toto", "USER").unwrap();
        assert!(matches!(sessions.verify(&token), Err(SessionError::Expired)));
    }
}
