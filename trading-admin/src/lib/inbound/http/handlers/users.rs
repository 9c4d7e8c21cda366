use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Extension;
use axum::Form;
use serde::Deserialize;

use super::required;
use super::user_error;
use super::FieldError;
use super::PageQuery;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UpsertUserCommand;
use crate::domain::user::models::User;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::views;
use crate::inbound::http::views::escape;

const BASE: &str = "/user";

/// User account form. The password is write-only: the stored hash is never
/// echoed back, and a blank password on update keeps the current one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub role: String,
}

impl UserForm {
    fn from_entity(entity: &User) -> Self {
        Self {
            username: entity.username.clone(),
            password: String::new(),
            fullname: entity.fullname.clone(),
            role: entity.role.clone(),
        }
    }

    fn validate(&self, password_required: bool) -> Result<UpsertUserCommand, Vec<FieldError>> {
        let mut errors = Vec::new();

        let username = required("username", &self.username, &mut errors);
        let fullname = required("fullname", &self.fullname, &mut errors);
        let role = required("role", &self.role, &mut errors);
        if password_required && self.password.trim().is_empty() {
            errors.push(FieldError::new("password", "is required"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(UpsertUserCommand {
            username,
            password: self.password.trim().to_string(),
            fullname,
            role,
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
        .users
        .find_paginated(request)
        .await
        .map_err(user_error)?;

    let mut rows = String::new();
    for item in &page.content {
        let id = item.id.unwrap_or_default();
        rows.push_str(&format!(
            "<tr><td>{id}</td><td>{username}</td><td>{fullname}</td>\
             <td>{role}</td><td>{actions}</td></tr>",
            id = id,
            username = escape(&item.username),
            fullname = escape(&item.fullname),
            role = escape(&item.role),
            actions = views::row_actions(BASE, id),
        ));
    }

    let body = format!(
        "<h1>Users</h1>\
         <p><a href=\"{BASE}/add\">Add New</a></p>\
         <table>\
         <tr><th>Id</th><th>Username</th><th>Full Name</th><th>Role</th><th></th></tr>\
         {rows}\
         </table>\
         {pager}",
        rows = rows,
        pager = views::pager(BASE, page.page_number, page.total_pages, page.page_size),
    );

    Ok(views::layout("Users", Some(&user.username), &body).into_response())
}

pub async fn add_form(Extension(user): Extension<CurrentUser>) -> Response {
    form_page(&user, &format!("{BASE}/validate"), &UserForm::default(), &[])
}

pub async fn validate(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<UserForm>,
) -> Result<Response, Response> {
    match form.validate(true) {
        Err(errors) => Ok(form_page(&user, &format!("{BASE}/validate"), &form, &errors)),
        Ok(command) => {
            state.users.insert(command).await.map_err(user_error)?;
            Ok(Redirect::to(&format!("{BASE}/list")).into_response())
        }
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Response, Response> {
    match state.users.find_by_id(id).await {
        Ok(entity) => Ok(form_page(
            &user,
            &format!("{BASE}/update/{id}"),
            &UserForm::from_entity(&entity),
            &[],
        )),
        Err(UserError::NotFound(_)) => Ok(Redirect::to(&format!("{BASE}/list")).into_response()),
        Err(err) => Err(user_error(err)),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Form(form): Form<UserForm>,
) -> Result<Response, Response> {
    match form.validate(false) {
        Err(errors) => Ok(form_page(&user, &format!("{BASE}/update/{id}"), &form, &errors)),
        Ok(command) => match state.users.update(id, command).await {
            Ok(_) | Err(UserError::NotFound(_)) => {
                Ok(Redirect::to(&format!("{BASE}/list")).into_response())
            }
            Err(err) => Err(user_error(err)),
        },
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, Response> {
    state.users.delete_by_id(id).await.map_err(user_error)?;

    Ok(Redirect::to(&format!("{BASE}/list")).into_response())
}

fn form_page(
    user: &CurrentUser,
    action: &str,
    form: &UserForm,
    errors: &[FieldError],
) -> Response {
    let body = format!(
        "<h1>User</h1>\
         {errors}\
         <form method=\"post\" action=\"{action}\">\
         {username}{fullname}{password}{role}\
         <p><button type=\"submit\">Save</button> \
         <a href=\"{BASE}/list\">Cancel</a></p>\
         </form>",
        errors = views::error_list(errors),
        action = escape(action),
        username = views::text_input("Username", "username", &form.username),
        fullname = views::text_input("Full Name", "fullname", &form.fullname),
        password = views::password_input("Password", "password"),
        role = views::text_input("Role", "role", &form.role),
    );

    views::layout("User", Some(&user.username), &body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_a_password() {
        let form = UserForm {
            username: "toto".to_string(),
            fullname: "Toto T".to_string(),
            role: "USER".to_string(),
            ..UserForm::default()
        };

        let errors = form.validate(true).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("password", "is required")]);

        let command = form.validate(false).unwrap();
        assert_eq!(command.password, "");
    }

    #[test]
    fn stored_hash_is_never_echoed_into_the_form() {
        let stored = User {
            id: Some(1),
            username: "toto".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
            fullname: "Toto T".to_string(),
            role: "USER".to_string(),
        };

        let form = UserForm::from_entity(&stored);

        assert_eq!(form.password, "");
    }

    #[test]
    fn blank_role_is_rejected() {
        let form = UserForm {
            username: "toto".to_string(),
            password: "123456".to_string(),
            fullname: "Toto T".to_string(),
            role: "  ".to_string(),
        };

        let errors = form.validate(true).unwrap_err();

        assert_eq!(errors, vec![FieldError::new("role", "is required")]);
    }
}
