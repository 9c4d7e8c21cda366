use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;

/// A persisted record with a server-generated integer id.
///
/// The five business entities share one lifecycle: created without an id,
/// assigned one on insert, addressed by it ever after. The trait is the
/// whole seam the generic CRUD service needs.
pub trait Entity: Send + Sync + Clone + 'static {
    /// Singular name used in log lines and error messages.
    const NAME: &'static str;

    fn id(&self) -> Option<i32>;
    fn set_id(&mut self, id: i32);
}

/// A bid/ask quote line. All price fields are inert data, nothing in the
/// application computes over them.
#[derive(Debug, Clone, PartialEq, Default, FromRow)]
pub struct BidList {
    pub id: Option<i32>,
    pub account: String,
    pub bid_type: String,
    pub bid_quantity: Option<f64>,
    pub ask_quantity: Option<f64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub benchmark: Option<String>,
    pub commentary: Option<String>,
}

impl Entity for BidList {
    const NAME: &'static str = "bid list";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }
}

/// One point on a value curve.
#[derive(Debug, Clone, PartialEq, Default, FromRow)]
pub struct CurvePoint {
    pub id: Option<i32>,
    pub curve_id: i32,
    pub term: Option<f64>,
    pub value: Option<f64>,
}

impl Entity for CurvePoint {
    const NAME: &'static str = "curve point";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }
}

/// Agency ratings for a security. Stored verbatim, never interpreted.
#[derive(Debug, Clone, PartialEq, Default, FromRow)]
pub struct Rating {
    pub id: Option<i32>,
    pub moodys_rating: Option<String>,
    pub sandp_rating: Option<String>,
    pub fitch_rating: Option<String>,
    pub order_number: Option<i32>,
}

impl Entity for Rating {
    const NAME: &'static str = "rating";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }
}

/// A named rule. The json/template/sql fields hold opaque text, this
/// application never parses or executes them.
#[derive(Debug, Clone, PartialEq, Default, FromRow)]
pub struct RuleName {
    pub id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub json: Option<String>,
    pub template: Option<String>,
    pub sql_str: Option<String>,
    pub sql_part: Option<String>,
}

impl Entity for RuleName {
    const NAME: &'static str = "rule name";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }
}

/// A trade ticket.
#[derive(Debug, Clone, PartialEq, Default, FromRow)]
pub struct Trade {
    pub id: Option<i32>,
    pub account: String,
    pub trade_type: String,
    pub buy_quantity: Option<f64>,
    pub sell_quantity: Option<f64>,
    pub buy_price: Option<f64>,
    pub sell_price: Option<f64>,
    pub trade_date: Option<DateTime<Utc>>,
}

impl Entity for Trade {
    const NAME: &'static str = "trade";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }
}
