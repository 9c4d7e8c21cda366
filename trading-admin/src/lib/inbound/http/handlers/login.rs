use axum::extract::Query;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::routes::post_login_destination;
use crate::inbound::http::middleware::SESSION_COOKIE;
use crate::inbound::http::router::AppState;
use crate::inbound::http::views;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
    pub logout: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login_form(Query(query): Query<LoginQuery>) -> Response {
    let notice = if query.error.is_some() {
        "<p class=\"error\">Invalid username or password.</p>"
    } else if query.logout.is_some() {
        "<p class=\"notice\">You have been signed out.</p>"
    } else {
        ""
    };

    let body = format!(
        "<h1>Sign in</h1>\
         {notice}\
         <form method=\"post\" action=\"/login\">\
         {username}{password}\
         <p><button type=\"submit\">Sign in</button></p>\
         </form>",
        notice = notice,
        username = views::text_input("Username", "username", ""),
        password = views::password_input("Password", "password"),
    );

    views::layout("Sign in", None, &body).into_response()
}

/// Credential submission. A generic failure redirect covers both the
/// unknown-username and wrong-password cases so neither is revealed.
pub async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    let principal = match state
        .authenticator
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(principal) => principal,
        Err(AuthError::UnknownUser | AuthError::BadCredentials) => {
            return Redirect::to("/login?error").into_response();
        }
        Err(err) => {
            tracing::error!("authentication unavailable: {err}");
            return views::internal_error();
        }
    };

    let Some(destination) = post_login_destination(&principal) else {
        tracing::warn!(
            username = %principal.username,
            role = %principal.role,
            "login with unrecognized role denied"
        );
        return views::forbidden(Some(&principal.username));
    };

    let token = match state.sessions.issue(&principal.username, &principal.role) {
        Ok(token) => token,
        Err(err) => {
            tracing::error!("session issuance failed: {err}");
            return views::internal_error();
        }
    };

    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");

    ([(SET_COOKIE, cookie)], Redirect::to(destination)).into_response()
}

/// Clears the session cookie and returns to the login page.
pub async fn logout() -> Response {
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");

    ([(SET_COOKIE, cookie)], Redirect::to("/login?logout")).into_response()
}
