use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Extension;
use axum::Form;
use serde::Deserialize;

use super::optional_text;
use super::required;
use super::storage_error;
use super::FieldError;
use super::PageQuery;
use crate::domain::entity::errors::EntityError;
use crate::domain::entity::models::RuleName;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::views;
use crate::inbound::http::views::escape;

const BASE: &str = "/ruleName";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleNameForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub json: String,
    #[serde(default)]
    pub template: String,
    #[serde(default, rename = "sqlStr")]
    pub sql_str: String,
    #[serde(default, rename = "sqlPart")]
    pub sql_part: String,
}

impl RuleNameForm {
    fn from_entity(entity: &RuleName) -> Self {
        Self {
            name: entity.name.clone(),
            description: entity.description.clone().unwrap_or_default(),
            json: entity.json.clone().unwrap_or_default(),
            template: entity.template.clone().unwrap_or_default(),
            sql_str: entity.sql_str.clone().unwrap_or_default(),
            sql_part: entity.sql_part.clone().unwrap_or_default(),
        }
    }

    fn validate(&self) -> Result<RuleName, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = required("name", &self.name, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(RuleName {
            id: None,
            name,
            description: optional_text(&self.description),
            json: optional_text(&self.json),
            template: optional_text(&self.template),
            sql_str: optional_text(&self.sql_str),
            sql_part: optional_text(&self.sql_part),
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
        .rule_names
        .find_paginated(request)
        .await
        .map_err(storage_error)?;

    let mut rows = String::new();
    for item in &page.content {
        let id = item.id.unwrap_or_default();
        rows.push_str(&format!(
            "<tr><td>{id}</td><td>{name}</td><td>{description}</td>\
             <td>{template}</td><td>{actions}</td></tr>",
            id = id,
            name = escape(&item.name),
            description = escape(item.description.as_deref().unwrap_or_default()),
            template = escape(item.template.as_deref().unwrap_or_default()),
            actions = views::row_actions(BASE, id),
        ));
    }

    let body = format!(
        "<h1>Rule Names</h1>\
         <p><a href=\"{BASE}/add\">Add New</a></p>\
         <table>\
         <tr><th>Id</th><th>Name</th><th>Description</th><th>Template</th><th></th></tr>\
         {rows}\
         </table>\
         {pager}",
        rows = rows,
        pager = views::pager(BASE, page.page_number, page.total_pages, page.page_size),
    );

    Ok(views::layout("Rule Names", Some(&user.username), &body).into_response())
}

pub async fn add_form(Extension(user): Extension<CurrentUser>) -> Response {
    form_page(&user, &format!("{BASE}/validate"), &RuleNameForm::default(), &[])
}

pub async fn validate(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<RuleNameForm>,
) -> Result<Response, Response> {
    match form.validate() {
        Err(errors) => Ok(form_page(&user, &format!("{BASE}/validate"), &form, &errors)),
        Ok(entity) => {
            state.rule_names.save(entity).await.map_err(storage_error)?;
            Ok(Redirect::to(&format!("{BASE}/list")).into_response())
        }
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Response, Response> {
    match state.rule_names.find_by_id(id).await {
        Ok(entity) => Ok(form_page(
            &user,
            &format!("{BASE}/update/{id}"),
            &RuleNameForm::from_entity(&entity),
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
    Form(form): Form<RuleNameForm>,
) -> Result<Response, Response> {
    match form.validate() {
        Err(errors) => Ok(form_page(&user, &format!("{BASE}/update/{id}"), &form, &errors)),
        Ok(mut entity) => {
            entity.id = Some(id);
            match state.rule_names.save(entity).await {
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
        .rule_names
        .delete_by_id(id)
        .await
        .map_err(storage_error)?;

    Ok(Redirect::to(&format!("{BASE}/list")).into_response())
}

fn form_page(
    user: &CurrentUser,
    action: &str,
    form: &RuleNameForm,
    errors: &[FieldError],
) -> Response {
    let body = format!(
        "<h1>Rule Name</h1>\
         {errors}\
         <form method=\"post\" action=\"{action}\">\
         {name}{description}{json}{template}{sql_str}{sql_part}\
         <p><button type=\"submit\">Save</button> \
         <a href=\"{BASE}/list\">Cancel</a></p>\
         </form>",
        errors = views::error_list(errors),
        action = escape(action),
        name = views::text_input("Name", "name", &form.name),
        description = views::text_input("Description", "description", &form.description),
        json = views::text_input("Json", "json", &form.json),
        template = views::text_input("Template", "template", &form.template),
        sql_str = views::text_input("SQL", "sqlStr", &form.sql_str),
        sql_part = views::text_input("SQL Part", "sqlPart", &form.sql_part),
    );

    views::layout("Rule Name", Some(&user.username), &body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        let errors = RuleNameForm::default().validate().unwrap_err();

        assert_eq!(errors, vec![FieldError::new("name", "is required")]);
    }

    #[test]
    fn optional_fields_default_to_none() {
        let form = RuleNameForm {
            name: "rule-1".to_string(),
            description: "checks limits".to_string(),
            ..RuleNameForm::default()
        };

        let entity = form.validate().unwrap();

        assert_eq!(entity.name, "rule-1");
        assert_eq!(entity.description, Some("checks limits".to_string()));
        assert_eq!(entity.sql_str, None);
    }
}
