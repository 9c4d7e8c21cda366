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
use super::optional_text;
use super::required;
use super::storage_error;
use super::FieldError;
use super::PageQuery;
use crate::domain::entity::errors::EntityError;
use crate::domain::entity::models::BidList;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::views;
use crate::inbound::http::views::escape;

const BASE: &str = "/bidList";

/// Raw form submission; every field arrives as text and is validated here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BidListForm {
    #[serde(default)]
    pub account: String,
    #[serde(default, rename = "bidType")]
    pub bid_type: String,
    #[serde(default, rename = "bidQuantity")]
    pub bid_quantity: String,
    #[serde(default, rename = "askQuantity")]
    pub ask_quantity: String,
    #[serde(default)]
    pub bid: String,
    #[serde(default)]
    pub ask: String,
    #[serde(default)]
    pub benchmark: String,
    #[serde(default)]
    pub commentary: String,
}

impl BidListForm {
    fn from_entity(entity: &BidList) -> Self {
        Self {
            account: entity.account.clone(),
            bid_type: entity.bid_type.clone(),
            bid_quantity: fmt_f64(entity.bid_quantity),
            ask_quantity: fmt_f64(entity.ask_quantity),
            bid: fmt_f64(entity.bid),
            ask: fmt_f64(entity.ask),
            benchmark: entity.benchmark.clone().unwrap_or_default(),
            commentary: entity.commentary.clone().unwrap_or_default(),
        }
    }

    fn validate(&self) -> Result<BidList, Vec<FieldError>> {
        let mut errors = Vec::new();

        let account = required("account", &self.account, &mut errors);
        let bid_type = required("bidType", &self.bid_type, &mut errors);
        let bid_quantity = optional_f64("bidQuantity", &self.bid_quantity, &mut errors);
        let ask_quantity = optional_f64("askQuantity", &self.ask_quantity, &mut errors);
        let bid = optional_f64("bid", &self.bid, &mut errors);
        let ask = optional_f64("ask", &self.ask, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(BidList {
            id: None,
            account,
            bid_type,
            bid_quantity,
            ask_quantity,
            bid,
            ask,
            benchmark: optional_text(&self.benchmark),
            commentary: optional_text(&self.commentary),
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
        .bid_lists
        .find_paginated(request)
        .await
        .map_err(storage_error)?;

    let mut rows = String::new();
    for item in &page.content {
        let id = item.id.unwrap_or_default();
        rows.push_str(&format!(
            "<tr><td>{id}</td><td>{account}</td><td>{bid_type}</td>\
             <td>{bid_quantity}</td><td>{bid}</td><td>{actions}</td></tr>",
            id = id,
            account = escape(&item.account),
            bid_type = escape(&item.bid_type),
            bid_quantity = fmt_f64(item.bid_quantity),
            bid = fmt_f64(item.bid),
            actions = views::row_actions(BASE, id),
        ));
    }

    let body = format!(
        "<h1>Bid List</h1>\
         <p><a href=\"{BASE}/add\">Add New</a></p>\
         <table>\
         <tr><th>Id</th><th>Account</th><th>Type</th>\
         <th>Bid Quantity</th><th>Bid</th><th></th></tr>\
         {rows}\
         </table>\
         {pager}",
        rows = rows,
        pager = views::pager(BASE, page.page_number, page.total_pages, page.page_size),
    );

    Ok(views::layout("Bid List", Some(&user.username), &body).into_response())
}

pub async fn add_form(Extension(user): Extension<CurrentUser>) -> Response {
    form_page(&user, &format!("{BASE}/validate"), &BidListForm::default(), &[])
}

pub async fn validate(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<BidListForm>,
) -> Result<Response, Response> {
    match form.validate() {
        Err(errors) => Ok(form_page(&user, &format!("{BASE}/validate"), &form, &errors)),
        Ok(entity) => {
            state.bid_lists.save(entity).await.map_err(storage_error)?;
            Ok(Redirect::to(&format!("{BASE}/list")).into_response())
        }
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Response, Response> {
    match state.bid_lists.find_by_id(id).await {
        Ok(entity) => Ok(form_page(
            &user,
            &format!("{BASE}/update/{id}"),
            &BidListForm::from_entity(&entity),
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
    Form(form): Form<BidListForm>,
) -> Result<Response, Response> {
    match form.validate() {
        Err(errors) => Ok(form_page(&user, &format!("{BASE}/update/{id}"), &form, &errors)),
        Ok(mut entity) => {
            entity.id = Some(id);
            match state.bid_lists.save(entity).await {
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
        .bid_lists
        .delete_by_id(id)
        .await
        .map_err(storage_error)?;

    Ok(Redirect::to(&format!("{BASE}/list")).into_response())
}

fn form_page(
    user: &CurrentUser,
    action: &str,
    form: &BidListForm,
    errors: &[FieldError],
) -> Response {
    let body = format!(
        "<h1>Bid List</h1>\
         {errors}\
         <form method=\"post\" action=\"{action}\">\
         {account}{bid_type}{bid_quantity}{ask_quantity}{bid}{ask}{benchmark}{commentary}\
         <p><button type=\"submit\">Save</button> \
         <a href=\"{BASE}/list\">Cancel</a></p>\
         </form>",
        errors = views::error_list(errors),
        action = escape(action),
        account = views::text_input("Account", "account", &form.account),
        bid_type = views::text_input("Type", "bidType", &form.bid_type),
        bid_quantity = views::text_input("Bid Quantity", "bidQuantity", &form.bid_quantity),
        ask_quantity = views::text_input("Ask Quantity", "askQuantity", &form.ask_quantity),
        bid = views::text_input("Bid", "bid", &form.bid),
        ask = views::text_input("Ask", "ask", &form.ask),
        benchmark = views::text_input("Benchmark", "benchmark", &form.benchmark),
        commentary = views::text_input("Commentary", "commentary", &form.commentary),
    );

    views::layout("Bid List", Some(&user.username), &body).into_response()
}
