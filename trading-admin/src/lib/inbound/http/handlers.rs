use axum::response::Response;
use serde::Deserialize;

use crate::domain::entity::errors::EntityError;
use crate::domain::page::PageRequest;
use crate::domain::user::errors::UserError;
use crate::inbound::http::router::AppState;
use crate::inbound::http::views;

pub mod bid_list;
pub mod curve_point;
pub mod home;
pub mod login;
pub mod rating;
pub mod rule_name;
pub mod trade;
pub mod users;

/// One validation message, attached to the form field it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Query string of every list page. Both parameters are optional; defaults
/// and the maximum come from configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl PageQuery {
    pub fn to_request(&self, state: &AppState) -> PageRequest {
        PageRequest::of(
            self.page.unwrap_or(0),
            self.size.unwrap_or(state.pagination.default_page_size),
            state.pagination.max_page_size,
        )
    }
}

pub(super) fn storage_error(err: EntityError) -> Response {
    tracing::error!("storage operation failed: {err}");
    views::internal_error()
}

pub(super) fn user_error(err: UserError) -> Response {
    tracing::error!("user operation failed: {err}");
    views::internal_error()
}

/// Trimmed value of a required text field; records an error when blank.
pub(super) fn required(
    field: &'static str,
    value: &str,
    errors: &mut Vec<FieldError>,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, "is required"));
    }
    trimmed.to_string()
}

/// Trimmed value of an optional text field; blank becomes `None`.
pub(super) fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(super) fn optional_f64(
    field: &'static str,
    value: &str,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.push(FieldError::new(field, "must be a number"));
            None
        }
    }
}

pub(super) fn optional_i32(
    field: &'static str,
    value: &str,
    errors: &mut Vec<FieldError>,
) -> Option<i32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.push(FieldError::new(field, "must be a whole number"));
            None
        }
    }
}

pub(super) fn required_i32(
    field: &'static str,
    value: &str,
    errors: &mut Vec<FieldError>,
) -> i32 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, "is required"));
        return 0;
    }
    match trimmed.parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            errors.push(FieldError::new(field, "must be a whole number"));
            0
        }
    }
}

/// Display helper for optional numeric columns.
pub(super) fn fmt_f64(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub(super) fn fmt_i32(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_accepts_non_blank() {
        let mut errors = Vec::new();

        assert_eq!(required("account", "  acc-1  ", &mut errors), "acc-1");
        assert!(errors.is_empty());
    }

    #[test]
    fn required_flags_blank_value() {
        let mut errors = Vec::new();

        assert_eq!(required("account", "   ", &mut errors), "");
        assert_eq!(errors, vec![FieldError::new("account", "is required")]);
    }

    #[test]
    fn optional_f64_accepts_blank_and_rejects_garbage() {
        let mut errors = Vec::new();

        assert_eq!(optional_f64("bid", "", &mut errors), None);
        assert_eq!(optional_f64("bid", "12.5", &mut errors), Some(12.5));
        assert!(errors.is_empty());

        assert_eq!(optional_f64("bid", "abc", &mut errors), None);
        assert_eq!(errors, vec![FieldError::new("bid", "must be a number")]);
    }

    #[test]
    fn required_i32_flags_blank_and_garbage() {
        let mut errors = Vec::new();

        assert_eq!(required_i32("curveId", "7", &mut errors), 7);
        assert!(errors.is_empty());

        required_i32("curveId", "", &mut errors);
        required_i32("curveId", "x", &mut errors);
        assert_eq!(
            errors,
            vec![
                FieldError::new("curveId", "is required"),
                FieldError::new("curveId", "must be a whole number"),
            ]
        );
    }
}
