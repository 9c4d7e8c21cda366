use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Extension;
use axum::Form;
use serde::Deserialize;

use super::fmt_f64;
use super::optional_f64;
use super::required_i32;
use super::storage_error;
use super::FieldError;
use super::PageQuery;
use crate::domain::entity::errors::EntityError;
use crate::domain::entity::models::CurvePoint;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::views;
use crate::inbound::http::views::escape;

const BASE: &str = "/curvePoint";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurvePointForm {
    #[serde(default, rename = "curveId")]
    pub curve_id: String,
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub value: String,
}

impl CurvePointForm {
    fn from_entity(entity: &CurvePoint) -> Self {
        Self {
            curve_id: entity.curve_id.to_string(),
            term: fmt_f64(entity.term),
            value: fmt_f64(entity.value),
        }
    }

    fn validate(&self) -> Result<CurvePoint, Vec<FieldError>> {
        let mut errors = Vec::new();

        let curve_id = required_i32("curveId", &self.curve_id, &mut errors);
        let term = optional_f64("term", &self.term, &mut errors);
        let value = optional_f64("value", &self.value, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CurvePoint {
            id: None,
            curve_id,
            term,
            value,
        })
    }
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<PageQuery>,
) -> Result<Response, Response> {
    let request = query.to_request(&state);
    let page = state
        .curve_points
        .find_paginated(request)
        .await
        .map_err(storage_error)?;

    let mut rows = String::new();
    for item in &page.content {
        let id = item.id.unwrap_or_default();
        rows.push_str(&format!(
            "<tr><td>{id}</td><td>{curve_id}</td><td>{term}</td>\
             <td>{value}</td><td>{actions}</td></tr>",
            id = id,
            curve_id = item.curve_id,
            term = fmt_f64(item.term),
            value = fmt_f64(item.value),
            actions = views::row_actions(BASE, id),
        ));
    }

    let body = format!(
        "<h1>Curve Points</h1>\
         <p><a href=\"{BASE}/add\">Add New</a></p>\
         <table>\
         <tr><th>Id</th><th>Curve Id</th><th>Term</th><th>Value</th><th></th></tr>\
         {rows}\
         </table>\
         {pager}",
        rows = rows,
        pager = views::pager(BASE, page.page_number, page.total_pages, page.page_size),
    );

    Ok(views::layout("Curve Points", Some(&user.username), &body).into_response())
}

pub async fn add_form(Extension(user): Extension<CurrentUser>) -> Response {
    form_page(
        &user,
        &format!("{BASE}/validate"),
        &CurvePointForm::default(),
        &[],
    )
}

pub async fn validate(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<CurvePointForm>,
) -> Result<Response, Response> {
    match form.validate() {
        Err(errors) => Ok(form_page(&user, &format!("{BASE}/validate"), &form, &errors)),
        Ok(entity) => {
            state
                .curve_points
                .save(entity)
                .await
                .map_err(storage_error)?;
            Ok(Redirect::to(&format!("{BASE}/list")).into_response())
        }
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Response, Response> {
    match state.curve_points.find_by_id(id).await {
        Ok(entity) => Ok(form_page(
            &user,
            &format!("{BASE}/update/{id}"),
            &CurvePointForm::from_entity(&entity),
            &[],
        )),
        Err(EntityError::NotFound { .. }) => {
            Ok(Redirect::to(&format!("{BASE}/list")).into_response())
        }
        Err(err) => Err(storage_error(err)),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Form(form): Form<CurvePointForm>,
) -> Result<Response, Response> {
    match form.validate() {
        Err(errors) => Ok(form_page(&user, &format!("{BASE}/update/{id}"), &form, &errors)),
        Ok(mut entity) => {
            entity.id = Some(id);
            match state.curve_points.save(entity).await {
                Ok(_) | Err(EntityError::NotFound { .. }) => {
                    Ok(Redirect::to(&format!("{BASE}/list")).into_response())
                }
                Err(err) => Err(storage_error(err)),
            }
        }
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, Response> {
    state
        .curve_points
        .delete_by_id(id)
        .await
        .map_err(storage_error)?;

    Ok(Redirect::to(&format!("{BASE}/list")).into_response())
}

fn form_page(
    user: &CurrentUser,
    action: &str,
    form: &CurvePointForm,
    errors: &[FieldError],
) -> Response {
    let body = format!(
        "<h1>Curve Point</h1>\
         {errors}\
         <form method=\"post\" action=\"{action}\">\
         {curve_id}{term}{value}\
         <p><button type=\"submit\">Save</button> \
         <a href=\"{BASE}/list\">Cancel</a></p>\
         </form>",
        errors = views::error_list(errors),
        action = escape(action),
        curve_id = views::text_input("Curve Id", "curveId", &form.curve_id),
        term = views::text_input("Term", "term", &form.term),
        value = views::text_input("Value", "value", &form.value),
    );

    views::layout("Curve Point", Some(&user.username), &body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_id_is_required() {
        let form = CurvePointForm::default();

        let errors = form.validate().unwrap_err();

        assert_eq!(errors, vec![FieldError::new("curveId", "is required")]);
    }

    #[test]
    fn valid_form_builds_entity() {
        let form = CurvePointForm {
            curve_id: "7".to_string(),
            term: "2.5".to_string(),
            value: "".to_string(),
        };

        let entity = form.validate().unwrap();

        assert_eq!(entity.curve_id, 7);
        assert_eq!(entity.term, Some(2.5));
        assert_eq!(entity.value, None);
    }
}
