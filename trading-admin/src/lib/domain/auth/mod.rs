pub mod errors;
pub mod models;
pub mod routes;
pub mod service;

pub use errors::AuthError;
pub use models::Principal;
pub use models::Role;
pub use routes::is_route_allowed;
pub use routes::post_login_destination;
pub use service::Authenticator;
