use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;

use crate::domain::auth::routes::is_route_allowed;
use crate::inbound::http::router::AppState;
use crate::inbound::http::views;

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "SESSION";

/// Extension type describing the authenticated user for downstream handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
    pub role: String,
}

/// Middleware guarding every non-public route.
///
/// A missing or invalid session cookie redirects to the login page. A valid
/// session whose role may not reach the requested path gets a 403. Otherwise
/// the request proceeds with a [`CurrentUser`] in its extensions.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_session_cookie(&req)
        .ok_or_else(|| Redirect::to("/login").into_response())?;

    let claims = state.sessions.verify(&token).map_err(|e| {
        tracing::warn!("session verification failed: {e}");
        Redirect::to("/login").into_response()
    })?;

    if !is_route_allowed(&claims.role, req.uri().path()) {
        tracing::warn!(
            username = %claims.sub,
            role = %claims.role,
            path = %req.uri().path(),
            "access denied"
        );
        return Err(views::forbidden(Some(&claims.sub)));
    }

    req.extensions_mut().insert(CurrentUser {
        username: claims.sub,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

fn extract_session_cookie(req: &Request) -> Option<String> {
    let cookies = req.headers().get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    use super::*;

    fn request_with_cookie(value: &str) -> Request {
        HttpRequest::builder()
            .uri("/bidList/list")
            .header(header::COOKIE, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn extracts_session_cookie_among_others() {
        let req = request_with_cookie("theme=dark; SESSION=abc.def.ghi; lang=en");

        assert_eq!(extract_session_cookie(&req), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn missing_session_cookie_yields_none() {
        let req = request_with_cookie("theme=dark; lang=en");

        assert_eq!(extract_session_cookie(&req), None);
    }

    #[test]
    fn no_cookie_header_yields_none() {
        let req = HttpRequest::builder()
            .uri("/bidList/list")
            .body(Body::empty())
            .unwrap();

        assert_eq!(extract_session_cookie(&req), None);
    }

    #[test]
    fn similarly_named_cookie_is_ignored() {
        let req = request_with_cookie("SESSIONID=nope; other=1");

        assert_eq!(extract_session_cookie(&req), None);
    }
}
