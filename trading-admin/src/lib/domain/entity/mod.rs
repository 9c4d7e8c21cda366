pub mod errors;
pub mod models;
pub mod ports;
pub mod service;

pub use errors::EntityError;
pub use models::BidList;
pub use models::CurvePoint;
pub use models::Entity;
pub use models::Rating;
pub use models::RuleName;
pub use models::Trade;
pub use ports::EntityRepository;
pub use service::EntityService;
