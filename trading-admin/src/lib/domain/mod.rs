pub mod auth;
pub mod entity;
pub mod page;
pub mod user;
