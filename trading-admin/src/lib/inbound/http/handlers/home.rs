use axum::response::IntoResponse;
use axum::response::Response;
use axum::Extension;

use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::views;

/// Administrative landing page.
pub async fn home(Extension(user): Extension<CurrentUser>) -> Response {
    let body = format!(
        "<h1>Home</h1><p>Welcome, {}.</p>",
        views::escape(&user.username)
    );

    views::layout("Home", Some(&user.username), &body).into_response()
}
