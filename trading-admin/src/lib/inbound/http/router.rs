use std::sync::Arc;
use std::time::Duration;

use auth::SessionManager;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::bid_list;
use super::handlers::curve_point;
use super::handlers::home::home;
use super::handlers::login::login_form;
use super::handlers::login::login_submit;
use super::handlers::login::logout;
use super::handlers::rating;
use super::handlers::rule_name;
use super::handlers::trade;
use super::handlers::users;
use super::middleware::require_session;
use crate::config::PaginationConfig;
use crate::domain::auth::service::Authenticator;
use crate::domain::entity::models::BidList;
use crate::domain::entity::models::CurvePoint;
use crate::domain::entity::models::Rating;
use crate::domain::entity::models::RuleName;
use crate::domain::entity::models::Trade;
use crate::domain::entity::service::EntityService;
use crate::domain::user::service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub bid_lists: Arc<EntityService<BidList>>,
    pub curve_points: Arc<EntityService<CurvePoint>>,
    pub ratings: Arc<EntityService<Rating>>,
    pub rule_names: Arc<EntityService<RuleName>>,
    pub trades: Arc<EntityService<Trade>>,
    pub users: Arc<UserService>,
    pub authenticator: Arc<Authenticator>,
    pub sessions: Arc<SessionManager>,
    pub pagination: PaginationConfig,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/login", get(login_form))
        .route("/login", post(login_submit))
        .route("/app-logout", get(logout));

    let protected_routes = Router::new()
        .route("/", get(home))
        .route("/bidList/list", get(bid_list::list))
        .route("/bidList/add", get(bid_list::add_form))
        .route("/bidList/validate", post(bid_list::validate))
        .route("/bidList/update/:id", get(bid_list::update_form))
        .route("/bidList/update/:id", post(bid_list::update))
        .route("/bidList/delete/:id", get(bid_list::delete))
        .route("/curvePoint/list", get(curve_point::list))
        .route("/curvePoint/add", get(curve_point::add_form))
        .route("/curvePoint/validate", post(curve_point::validate))
        .route("/curvePoint/update/:id", get(curve_point::update_form))
        .route("/curvePoint/update/:id", post(curve_point::update))
        .route("/curvePoint/delete/:id", get(curve_point::delete))
        .route("/rating/list", get(rating::list))
        .route("/rating/add", get(rating::add_form))
        .route("/rating/validate", post(rating::validate))
        .route("/rating/update/:id", get(rating::update_form))
        .route("/rating/update/:id", post(rating::update))
        .route("/rating/delete/:id", get(rating::delete))
        .route("/ruleName/list", get(rule_name::list))
        .route("/ruleName/add", get(rule_name::add_form))
        .route("/ruleName/validate", post(rule_name::validate))
        .route("/ruleName/update/:id", get(rule_name::update_form))
        .route("/ruleName/update/:id", post(rule_name::update))
        .route("/ruleName/delete/:id", get(rule_name::delete))
        .route("/trade/list", get(trade::list))
        .route("/trade/add", get(trade::add_form))
        .route("/trade/validate", post(trade::validate))
        .route("/trade/update/:id", get(trade::update_form))
        .route("/trade/update/:id", post(trade::update))
        .route("/trade/delete/:id", get(trade::delete))
        .route("/user/list", get(users::list))
        .route("/user/add", get(users::add_form))
        .route("/user/validate", post(users::validate))
        .route("/user/update/:id", get(users::update_form))
        .route("/user/update/:id", post(users::update))
        .route("/user/delete/:id", get(users::delete))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .with_state(state)
}
