//! Authentication infrastructure for the trading admin application.
//!
//! Two building blocks, kept free of any domain knowledge so the web
//! application wires them into its own services:
//! - Password hashing (Argon2id, PHC string format at rest)
//! - Signed, expiring session tokens carried in a browser cookie
//!
//! # Examples
//!
//! ## Password hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("123456").unwrap();
//! assert!(hasher.verify("123456", &hash).unwrap());
//! assert!(!hasher.verify("654321", &hash).unwrap());
//! ```
//!
//! ## Session tokens
//! ```
//! use auth::{SessionClaims, SessionManager};
//!
//! let sessions = SessionManager::new(b"secret_key_at_least_32_bytes_long!", 8);
//! let token = sessions.issue("toto", "USER").unwrap();
//! let claims: SessionClaims = sessions.verify(&token).unwrap();
//! assert_eq!(claims.sub, "toto");
//! assert_eq!(claims.role, "USER");
//! ```

pub mod password;
pub mod session;

pub use password::PasswordError;
pub use password::PasswordHasher;
pub use session::SessionClaims;
pub use session::SessionError;
pub use session::SessionManager;
