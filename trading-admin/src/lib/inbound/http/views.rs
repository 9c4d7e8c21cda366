//! Hand-rolled HTML fragments for the server-rendered pages.
//!
//! Every dynamic value goes through [`escape`] before it is spliced into
//! markup. Pages share a single [`layout`] shell so the navigation bar and
//! styling stay consistent across entities.

use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::FieldError;

/// Replace the characters that would change the meaning of the markup.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Shared page shell. `username` controls whether the navigation bar and
/// logout link are shown.
pub fn layout(title: &str, username: Option<&str>, body: &str) -> Html<String> {
    let nav = match username {
        Some(username) => format!(
            concat!(
                "<nav>",
                "<a href=\"/bidList/list\">Bid List</a> | ",
                "<a href=\"/curvePoint/list\">Curve Points</a> | ",
                "<a href=\"/rating/list\">Ratings</a> | ",
                "<a href=\"/ruleName/list\">Rule Names</a> | ",
                "<a href=\"/trade/list\">Trades</a> | ",
                "<a href=\"/user/list\">Users</a>",
                "<span class=\"session\">{} (<a href=\"/app-logout\">Logout</a>)</span>",
                "</nav>"
            ),
            escape(username)
        ),
        None => String::new(),
    };

    Html(format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head><meta charset=\"utf-8\"><title>{title}</title></head>\n",
            "<body>\n{nav}\n<main>\n{body}\n</main>\n</body>\n",
            "</html>\n"
        ),
        title = escape(title),
        nav = nav,
        body = body,
    ))
}

/// Validation messages rendered above the originating form.
pub fn error_list(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let mut list = String::from("<ul class=\"errors\">");
    for error in errors {
        list.push_str(&format!(
            "<li>{}: {}</li>",
            escape(error.field),
            escape(error.message)
        ));
    }
    list.push_str("</ul>");
    list
}

/// A labelled single-line text input, pre-filled with the submitted value.
pub fn text_input(label: &str, name: &str, value: &str) -> String {
    format!(
        concat!(
            "<p><label for=\"{name}\">{label}</label> ",
            "<input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\"></p>"
        ),
        label = escape(label),
        name = escape(name),
        value = escape(value),
    )
}

/// A labelled password input. The value is never echoed back.
pub fn password_input(label: &str, name: &str) -> String {
    format!(
        concat!(
            "<p><label for=\"{name}\">{label}</label> ",
            "<input type=\"password\" id=\"{name}\" name=\"{name}\"></p>"
        ),
        label = escape(label),
        name = escape(name),
    )
}

/// Previous/next navigation for a list page. Pages are 0-based internally
/// but displayed 1-based.
pub fn pager(base_path: &str, page_number: u32, total_pages: u32, page_size: u32) -> String {
    let mut nav = String::from("<div class=\"pager\">");
    if page_number > 0 {
        nav.push_str(&format!(
            "<a href=\"{base}/list?page={page}&amp;size={size}\">Previous</a> ",
            base = base_path,
            page = page_number - 1,
            size = page_size,
        ));
    }
    nav.push_str(&format!(
        "Page {} of {}",
        page_number + 1,
        total_pages.max(1)
    ));
    if page_number + 1 < total_pages {
        nav.push_str(&format!(
            " <a href=\"{base}/list?page={page}&amp;size={size}\">Next</a>",
            base = base_path,
            page = page_number + 1,
            size = page_size,
        ));
    }
    nav.push_str("</div>");
    nav
}

/// Edit and delete links for one row of a list table.
pub fn row_actions(base_path: &str, id: i32) -> String {
    format!(
        concat!(
            "<a href=\"{base}/update/{id}\">Edit</a> ",
            "<a href=\"{base}/delete/{id}\">Delete</a>"
        ),
        base = base_path,
        id = id,
    )
}

/// 403 page shown when the authenticated role may not reach the route.
pub fn forbidden(username: Option<&str>) -> Response {
    let body = "<h1>Forbidden</h1><p>You are not authorized to view this page.</p>";
    (StatusCode::FORBIDDEN, layout("Forbidden", username, body)).into_response()
}

/// 500 page for storage failures. The detail stays in the logs.
pub fn internal_error() -> Response {
    let body = "<h1>Something went wrong</h1><p>Please try again later.</p>";
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        layout("Error", None, body),
    )
        .into_response()
}
