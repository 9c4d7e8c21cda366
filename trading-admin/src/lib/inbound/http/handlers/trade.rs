use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Extension;
use axum::Form;
use chrono::DateTime;
use chrono::NaiveDateTime;
use chrono::Utc;
use serde::Deserialize;

use super::fmt_f64;
use super::optional_f64;
use super::required;
use super::storage_error;
use super::FieldError;
use super::PageQuery;
use crate::domain::entity::errors::EntityError;
use crate::domain::entity::models::Trade;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::views;
use crate::inbound::http::views::escape;

const BASE: &str = "/trade";

/// Format accepted for the trade date field, matching the value of an HTML
/// `datetime-local` input.
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TradeForm {
    #[serde(default)]
    pub account: String,
    #[serde(default, rename = "tradeType")]
    pub trade_type: String,
    #[serde(default, rename = "buyQuantity")]
    pub buy_quantity: String,
    #[serde(default, rename = "sellQuantity")]
    pub sell_quantity: String,
    #[serde(default, rename = "buyPrice")]
    pub buy_price: String,
    #[serde(default, rename = "sellPrice")]
    pub sell_price: String,
    #[serde(default, rename = "tradeDate")]
    pub trade_date: String,
}

impl TradeForm {
    fn from_entity(entity: &Trade) -> Self {
        Self {
            account: entity.account.clone(),
            trade_type: entity.trade_type.clone(),
            buy_quantity: fmt_f64(entity.buy_quantity),
            sell_quantity: fmt_f64(entity.sell_quantity),
            buy_price: fmt_f64(entity.buy_price),
            sell_price: fmt_f64(entity.sell_price),
            trade_date: entity
                .trade_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    fn validate(&self) -> Result<Trade, Vec<FieldError>> {
        let mut errors = Vec::new();

        let account = required("account", &self.account, &mut errors);
        let trade_type = required("tradeType", &self.trade_type, &mut errors);
        let buy_quantity = optional_f64("buyQuantity", &self.buy_quantity, &mut errors);
        let sell_quantity = optional_f64("sellQuantity", &self.sell_quantity, &mut errors);
        let buy_price = optional_f64("buyPrice", &self.buy_price, &mut errors);
        let sell_price = optional_f64("sellPrice", &self.sell_price, &mut errors);
        let trade_date = parse_trade_date(&self.trade_date, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Trade {
            id: None,
            account,
            trade_type,
            buy_quantity,
            sell_quantity,
            buy_price,
            sell_price,
            trade_date,
        })
    }
}

fn parse_trade_date(value: &str, errors: &mut Vec<FieldError>) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDateTime::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(naive) => Some(naive.and_utc()),
        Err(_) => {
            errors.push(FieldError::new("tradeDate", "must be a date and time"));
            None
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<PageQuery>,
) -> Result<Response, Response> {
    let request = query.to_request(&state);
    let page = state
        .trades
        .find_paginated(request)
        .await
        .map_err(storage_error)?;

    let mut rows = String::new();
    for item in &page.content {
        let id = item.id.unwrap_or_default();
        rows.push_str(&format!(
            "<tr><td>{id}</td><td>{account}</td><td>{trade_type}</td>\
             <td>{buy_quantity}</td><td>{buy_price}</td><td>{date}</td>\
             <td>{actions}</td></tr>",
            id = id,
            account = escape(&item.account),
            trade_type = escape(&item.trade_type),
            buy_quantity = fmt_f64(item.buy_quantity),
            buy_price = fmt_f64(item.buy_price),
            date = item
                .trade_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            actions = views::row_actions(BASE, id),
        ));
    }

    let body = format!(
        "<h1>Trades</h1>\
         <p><a href=\"{BASE}/add\">Add New</a></p>\
         <table>\
         <tr><th>Id</th><th>Account</th><th>Type</th>\
         <th>Buy Quantity</th><th>Buy Price</th><th>Date</th><th></th></tr>\
         {rows}\
         </table>\
         {pager}",
        rows = rows,
        pager = views::pager(BASE, page.page_number, page.total_pages, page.page_size),
    );

    Ok(views::layout("Trades", Some(&user.username), &body).into_response())
}

pub async fn add_form(Extension(user): Extension<CurrentUser>) -> Response {
    form_page(&user, &format!("{BASE}/validate"), &TradeForm::default(), &[])
}

pub async fn validate(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<TradeForm>,
) -> Result<Response, Response> {
    match form.validate() {
        Err(errors) => Ok(form_page(&user, &format!("{BASE}/validate"), &form, &errors)),
        Ok(entity) => {
            state.trades.save(entity).await.map_err(storage_error)?;
            Ok(Redirect::to(&format!("{BASE}/list")).into_response())
        }
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Response, Response> {
    match state.trades.find_by_id(id).await {
        Ok(entity) => Ok(form_page(
            &user,
            &format!("{BASE}/update/{id}"),
            &TradeForm::from_entity(&entity),
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
    Form(form): Form<TradeForm>,
) -> Result<Response, Response> {
    match form.validate() {
        Err(errors) => Ok(form_page(&user, &format!("{BASE}/update/{id}"), &form, &errors)),
        Ok(mut entity) => {
            entity.id = Some(id);
            match state.trades.save(entity).await {
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
        .trades
        .delete_by_id(id)
        .await
        .map_err(storage_error)?;

    Ok(Redirect::to(&format!("{BASE}/list")).into_response())
}

fn form_page(
    user: &CurrentUser,
    action: &str,
    form: &TradeForm,
    errors: &[FieldError],
) -> Response {
    let body = format!(
        "<h1>Trade</h1>\
         {errors}\
         <form method=\"post\" action=\"{action}\">\
         {account}{trade_type}{buy_quantity}{sell_quantity}{buy_price}{sell_price}{trade_date}\
         <p><button type=\"submit\">Save</button> \
         <a href=\"{BASE}/list\">Cancel</a></p>\
         </form>",
        errors = views::error_list(errors),
        action = escape(action),
        account = views::text_input("Account", "account", &form.account),
        trade_type = views::text_input("Type", "tradeType", &form.trade_type),
        buy_quantity = views::text_input("Buy Quantity", "buyQuantity", &form.buy_quantity),
        sell_quantity = views::text_input("Sell Quantity", "sellQuantity", &form.sell_quantity),
        buy_price = views::text_input("Buy Price", "buyPrice", &form.buy_price),
        sell_price = views::text_input("Sell Price", "sellPrice", &form.sell_price),
        trade_date = views::text_input("Trade Date", "tradeDate", &form.trade_date),
    );

    views::layout("Trade", Some(&user.username), &body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_and_type_are_required() {
        let errors = TradeForm::default().validate().unwrap_err();

        assert_eq!(
            errors,
            vec![
                FieldError::new("account", "is required"),
                FieldError::new("tradeType", "is required"),
            ]
        );
    }

    #[test]
    fn trade_date_round_trips_through_the_form_format() {
        let form = TradeForm {
            account: "acc-1".to_string(),
            trade_type: "BUY".to_string(),
            trade_date: "2024-06-01T09:30".to_string(),
            ..TradeForm::default()
        };

        let entity = form.validate().unwrap();

        assert_eq!(TradeForm::from_entity(&entity).trade_date, "2024-06-01T09:30");
    }

    #[test]
    fn malformed_trade_date_is_a_field_error() {
        let form = TradeForm {
            account: "acc-1".to_string(),
            trade_type: "BUY".to_string(),
            trade_date: "yesterday".to_string(),
            ..TradeForm::default()
        };

        let errors = form.validate().unwrap_err();

        assert_eq!(
            errors,
            vec![FieldError::new("tradeDate", "must be a date and time")]
        );
    }
}
