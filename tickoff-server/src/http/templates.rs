//! Page templates

use std::fmt;

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use super::flash::FlashMessage;
use crate::models::{Todo, TodoList};

/// Template wrapper that converts Askama templates into HTML responses.
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => render_failed(&err),
        }
    }
}

// Details stay in the log; the client gets a generic page.
fn render_failed(err: &dyn fmt::Display) -> Response {
    tracing::error!(error = %err, "Failed to render template");
    (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.").into_response()
}

#[derive(Template)]
#[template(path = "signin.html")]
pub struct SigninTemplate {
    pub signed_in_as: Option<String>,
    pub flashes: Vec<FlashMessage>,
    pub username: String,
}

#[derive(Template)]
#[template(path = "lists.html")]
pub struct ListsTemplate {
    pub signed_in_as: Option<String>,
    pub flashes: Vec<FlashMessage>,
    pub lists: Vec<TodoList>,
}

#[derive(Template)]
#[template(path = "new_list.html")]
pub struct NewListTemplate {
    pub signed_in_as: Option<String>,
    pub flashes: Vec<FlashMessage>,
    pub title: String,
}

#[derive(Template)]
#[template(path = "list.html")]
pub struct ListTemplate {
    pub signed_in_as: Option<String>,
    pub flashes: Vec<FlashMessage>,
    pub list: TodoList,
    pub todos: Vec<Todo>,
    pub todo_title: String,
}

#[derive(Template)]
#[template(path = "edit_list.html")]
pub struct EditListTemplate {
    pub signed_in_as: Option<String>,
    pub flashes: Vec<FlashMessage>,
    pub list: TodoList,
    pub title: String,
}
