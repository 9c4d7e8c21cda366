pub mod bid_list;
pub mod curve_point;
pub mod rating;
pub mod rule_name;
pub mod trade;
pub mod user;

pub use bid_list::PostgresBidListRepository;
pub use curve_point::PostgresCurvePointRepository;
pub use rating::PostgresRatingRepository;
pub use rule_name::PostgresRuleNameRepository;
pub use trade::PostgresTradeRepository;
pub use user::PostgresUserRepository;

use crate::domain::entity::errors::EntityError;

pub(crate) fn db_error(err: sqlx::Error) -> EntityError {
    EntityError::Database(err.to_string())
}
