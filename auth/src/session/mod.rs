pub mod claims;
pub mod errors;
pub mod manager;

pub use claims::SessionClaims;
pub use errors::SessionError;
pub use manager::SessionManager;
