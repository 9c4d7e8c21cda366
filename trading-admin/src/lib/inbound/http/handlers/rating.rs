use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Extension;
use axum::Form;
use serde::Deserialize;

use super::fmt_i32;
use super::optional_i32;
use super::optional_text;
use super::storage_error;
use super::FieldError;
use super::PageQuery;
use crate::domain::entity::errors::EntityError;
use crate::domain::entity::models::Rating;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::views;
use crate::inbound::http::views::escape;

const BASE: &str = "/rating";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingForm {
    #[serde(default, rename = "moodysRating")]
    pub moodys_rating: String,
    #[serde(default, rename = "sandpRating")]
    pub sandp_rating: String,
    #[serde(default, rename = "fitchRating")]
    pub fitch_rating: String,
    #[serde(default, rename = "orderNumber")]
    pub order_number: String,
}

impl RatingForm {
    fn from_entity(entity: &Rating) -> Self {
        Self {
            moodys_rating: entity.moodys_rating.clone().unwrap_or_default(),
            sandp_rating: entity.sandp_rating.clone().unwrap_or_default(),
            fitch_rating: entity.fitch_rating.clone().unwrap_or_default(),
            order_number: fmt_i32(entity.order_number),
        }
    }

    fn validate(&self) -> Result<Rating, Vec<FieldError>> {
        let mut errors = Vec::new();

        let order_number = optional_i32("orderNumber", &self.order_number, &mut errors);
        if matches!(order_number, Some(n) if n <= 0) {
            errors.push(FieldError::new("orderNumber", "must be positive"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Rating {
            id: None,
            moodys_rating: optional_text(&self.moodys_rating),
            sandp_rating: optional_text(&self.sandp_rating),
            fitch_rating: optional_text(&self.fitch_rating),
            order_number,
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
        .ratings
        .find_paginated(request)
        .await
        .map_err(storage_error)?;

    let mut rows = String::new();
    for item in &page.content {
        let id = item.id.unwrap_or_default();
        rows.push_str(&format!(
            "<tr><td>{id}</td><td>{moodys}</td><td>{sandp}</td>\
             <td>{fitch}</td><td>{order}</td><td>{actions}</td></tr>",
            id = id,
            moodys = escape(item.moodys_rating.as_deref().unwrap_or_default()),
            sandp = escape(item.sandp_rating.as_deref().unwrap_or_default()),
            fitch = escape(item.fitch_rating.as_deref().unwrap_or_default()),
            order = fmt_i32(item.order_number),
            actions = views::row_actions(BASE, id),
        ));
    }

    let body = format!(
        "<h1>Ratings</h1>\
         <p><a href=\"{BASE}/add\">Add New</a></p>\
         <table>\
         <tr><th>Id</th><th>Moodys</th><th>S&amp;P</th>\
         <th>Fitch</th><th>Order</th><th></th></tr>\
         {rows}\
         </table>\
         {pager}",
        rows = rows,
        pager = views::pager(BASE, page.page_number, page.total_pages, page.page_size),
    );

    Ok(views::layout("Ratings", Some(&user.username), &body).into_response())
}

pub async fn add_form(Extension(user): Extension<CurrentUser>) -> Response {
    form_page(&user, &format!("{BASE}/validate"), &RatingForm::default(), &[])
}

pub async fn validate(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<RatingForm>,
) -> Result<Response, Response> {
    match form.validate() {
        Err(errors) => Ok(form_page(&user, &format!("{BASE}/validate"), &form, &errors)),
        Ok(entity) => {
            state.ratings.save(entity).await.map_err(storage_error)?;
            Ok(Redirect::to(&format!("{BASE}/list")).into_response())
        }
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Response, Response> {
    match state.ratings.find_by_id(id).await {
        Ok(entity) => Ok(form_page(
            &user,
            &format!("{BASE}/update/{id}"),
            &RatingForm::from_entity(&entity),
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
    Form(form): Form<RatingForm>,
) -> Result<Response, Response> {
    match form.validate() {
        Err(errors) => Ok(form_page(&user, &format!("{BASE}/update/{id}"), &form, &errors)),
        Ok(mut entity) => {
            entity.id = Some(id);
            match state.ratings.save(entity).await {
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
        .ratings
        .delete_by_id(id)
        .await
        .map_err(storage_error)?;

    Ok(Redirect::to(&format!("{BASE}/list")).into_response())
}

fn form_page(
    user: &CurrentUser,
    action: &str,
    form: &RatingForm,
    errors: &[FieldError],
) -> Response {
    let body = format!(
        "<h1>Rating</h1>\
         {errors}\
         <form method=\"post\" action=\"{action}\">\
         {moodys}{sandp}{fitch}{order}\
         <p><button type=\"submit\">Save</button> \
         <a href=\"{BASE}/list\">Cancel</a></p>\
         </form>",
        errors = views::error_list(errors),
        action = escape(action),
        moodys = views::text_input("Moodys Rating", "moodysRating", &form.moodys_rating),
        sandp = views::text_input("S&P Rating", "sandpRating", &form.sandp_rating),
        fitch = views::text_input("Fitch Rating", "fitchRating", &form.fitch_rating),
        order = views::text_input("Order Number", "orderNumber", &form.order_number),
    );

    views::layout("Rating", Some(&user.username), &body).into_response()
}
