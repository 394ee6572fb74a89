//! Todo actions within a list

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::post,
    Form, Router,
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use super::lists::list_page;
use crate::db::TodoStore;
use crate::http::error::ApiError;
use crate::http::extractors::{ListId, TodoPath};
use crate::http::flash::{self, FlashMessage};
use crate::http::session::SignedIn;
use crate::models::Title;
use crate::state::AppState;

/// New todo form body
#[derive(Deserialize)]
pub struct TodoForm {
    pub todo_title: String,
}

/// POST /lists/{id}/todos
async fn create_todo(
    SignedIn { username }: SignedIn,
    State(state): State<AppState>,
    ListId(list_id): ListId,
    jar: SignedCookieJar,
    Form(form): Form<TodoForm>,
) -> Result<Response, ApiError> {
    let title = match Title::todo(&form.todo_title) {
        Ok(title) => title,
        Err(e) => {
            let flashes = vec![FlashMessage::error(e.to_string())];
            return list_page(&state, username, list_id, flashes, form.todo_title).await;
        }
    };

    let added = TodoStore::new(state.executor(), &username)
        .add_todo(title.as_str(), list_id)
        .await?;

    if !added {
        return Err(ApiError::not_found("todo list", list_id));
    }

    let jar = flash::push(jar, FlashMessage::success("The todo has been created."));
    Ok((jar, Redirect::to(&format!("/lists/{list_id}"))).into_response())
}

/// POST /lists/{id}/todos/{todo_id}/toggle
async fn toggle_todo(
    SignedIn { username }: SignedIn,
    State(state): State<AppState>,
    TodoPath { list_id, todo_id }: TodoPath,
    jar: SignedCookieJar,
) -> Result<Response, ApiError> {
    let store = TodoStore::new(state.executor(), &username);

    if !store.toggle_done(list_id, todo_id).await? {
        return Err(ApiError::not_found("todo", todo_id));
    }

    let todo = store
        .load_todo(list_id, todo_id)
        .await?
        .ok_or_else(|| ApiError::not_found("todo", todo_id))?;

    let message = if todo.done {
        "Todo marked as done."
    } else {
        "Todo marked as NOT done."
    };

    let jar = flash::push(jar, FlashMessage::success(message));
    Ok((jar, Redirect::to(&format!("/lists/{list_id}"))).into_response())
}

/// POST /lists/{id}/todos/{todo_id}/destroy
async fn destroy_todo(
    SignedIn { username }: SignedIn,
    State(state): State<AppState>,
    TodoPath { list_id, todo_id }: TodoPath,
    jar: SignedCookieJar,
) -> Result<Response, ApiError> {
    let removed = TodoStore::new(state.executor(), &username)
        .remove_todo(list_id, todo_id)
        .await?;

    if !removed {
        return Err(ApiError::not_found("todo", todo_id));
    }

    let jar = flash::push(jar, FlashMessage::success("The todo has been deleted."));
    Ok((jar, Redirect::to(&format!("/lists/{list_id}"))).into_response())
}

/// Todo routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lists/{id}/todos", post(create_todo))
        .route("/lists/{id}/todos/{todo_id}/toggle", post(toggle_todo))
        .route("/lists/{id}/todos/{todo_id}/destroy", post(destroy_todo))
}

