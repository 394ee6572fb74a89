//! Todo list pages and actions

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use crate::db::{is_unique_constraint_violation, TodoStore};
use crate::http::error::ApiError;
use crate::http::extractors::ListId;
use crate::http::flash::{self, FlashMessage};
use crate::http::session::SignedIn;
use crate::http::templates::{
    EditListTemplate, HtmlTemplate, ListTemplate, ListsTemplate, NewListTemplate,
};
use crate::models::{Title, TodoList};
use crate::state::AppState;

const DUPLICATE_TITLE: &str = "The list title must be unique.";

/// New/edit list form body
#[derive(Deserialize)]
pub struct ListForm {
    pub title: String,
}

/// GET /
async fn index() -> Redirect {
    Redirect::to("/lists")
}

/// GET /lists
async fn list_lists(
    SignedIn { username }: SignedIn,
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, ApiError> {
    let lists = TodoStore::new(state.executor(), &username)
        .all_todo_lists()
        .await?;
    let (jar, flashes) = flash::take(jar);

    Ok((
        jar,
        HtmlTemplate(ListsTemplate {
            signed_in_as: Some(username),
            flashes,
            lists,
        }),
    )
        .into_response())
}

/// GET /lists/new
async fn new_list_form(SignedIn { username }: SignedIn, jar: SignedCookieJar) -> Response {
    let (jar, flashes) = flash::take(jar);

    (
        jar,
        HtmlTemplate(NewListTemplate {
            signed_in_as: Some(username),
            flashes,
            title: String::new(),
        }),
    )
        .into_response()
}

/// POST /lists
async fn create_list(
    SignedIn { username }: SignedIn,
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<ListForm>,
) -> Result<Response, ApiError> {
    let rerender = |username: String, message: String, title: String| {
        HtmlTemplate(NewListTemplate {
            signed_in_as: Some(username),
            flashes: vec![FlashMessage::error(message)],
            title,
        })
        .into_response()
    };

    let title = match Title::list(&form.title) {
        Ok(title) => title,
        Err(e) => return Ok(rerender(username, e.to_string(), form.title)),
    };

    let store = TodoStore::new(state.executor(), &username);
    let created = !store.exists_todo_list_title(title.as_str()).await?
        && store.create_todo_list(title.as_str()).await?;

    if !created {
        return Ok(rerender(username.clone(), DUPLICATE_TITLE.into(), form.title));
    }

    let jar = flash::push(jar, FlashMessage::success("The list has been created."));
    Ok((jar, Redirect::to("/lists")).into_response())
}

/// GET /lists/{id}
async fn show_list(
    SignedIn { username }: SignedIn,
    State(state): State<AppState>,
    ListId(id): ListId,
    jar: SignedCookieJar,
) -> Result<Response, ApiError> {
    let (jar, flashes) = flash::take(jar);
    let page = list_page(&state, username, id, flashes, String::new()).await?;
    Ok((jar, page).into_response())
}

/// Render a list with its sorted todos; shared with todo form re-renders.
pub(crate) async fn list_page(
    state: &AppState,
    username: String,
    id: i32,
    flashes: Vec<FlashMessage>,
    todo_title: String,
) -> Result<Response, ApiError> {
    let store = TodoStore::new(state.executor(), &username);
    let list = load_list(&store, id).await?;
    let todos = store.sorted_todos(&list).await?;

    Ok(HtmlTemplate(ListTemplate {
        signed_in_as: Some(username.clone()),
        flashes,
        list,
        todos,
        todo_title,
    })
    .into_response())
}

/// GET /lists/{id}/edit
async fn edit_list_form(
    SignedIn { username }: SignedIn,
    State(state): State<AppState>,
    ListId(id): ListId,
    jar: SignedCookieJar,
) -> Result<Response, ApiError> {
    let list = load_list(&TodoStore::new(state.executor(), &username), id).await?;
    let (jar, flashes) = flash::take(jar);

    Ok((
        jar,
        HtmlTemplate(EditListTemplate {
            signed_in_as: Some(username),
            flashes,
            title: list.title.clone(),
            list,
        }),
    )
        .into_response())
}

/// POST /lists/{id} - rename
async fn update_list(
    SignedIn { username }: SignedIn,
    State(state): State<AppState>,
    ListId(id): ListId,
    jar: SignedCookieJar,
    Form(form): Form<ListForm>,
) -> Result<Response, ApiError> {
    let store = TodoStore::new(state.executor(), &username);
    let list = load_list(&store, id).await?;

    let rerender = |list: TodoList, message: String, title: String| {
        HtmlTemplate(EditListTemplate {
            signed_in_as: Some(username.clone()),
            flashes: vec![FlashMessage::error(message)],
            list,
            title,
        })
        .into_response()
    };

    let title = match Title::list(&form.title) {
        Ok(title) => title,
        Err(e) => return Ok(rerender(list, e.to_string(), form.title)),
    };

    // A list always matches its own title
    let unchanged = title.as_str() == list.title;
    if !unchanged && store.exists_todo_list_title(title.as_str()).await? {
        return Ok(rerender(list, DUPLICATE_TITLE.into(), form.title));
    }

    match store.set_title(id, title.as_str()).await {
        Ok(true) => {}
        Ok(false) => return Err(ApiError::not_found("todo list", id)),
        // Another request took the title after the pre-check
        Err(e) if is_unique_constraint_violation(&e) => {
            return Ok(rerender(list, DUPLICATE_TITLE.into(), form.title));
        }
        Err(e) => return Err(e.into()),
    }

    let jar = flash::push(jar, FlashMessage::success("Todo list updated."));
    Ok((jar, Redirect::to(&format!("/lists/{id}"))).into_response())
}

/// POST /lists/{id}/destroy
async fn destroy_list(
    SignedIn { username }: SignedIn,
    State(state): State<AppState>,
    ListId(id): ListId,
    jar: SignedCookieJar,
) -> Result<Response, ApiError> {
    let deleted = TodoStore::new(state.executor(), &username)
        .delete_todo_list(id)
        .await?;

    if !deleted {
        return Err(ApiError::not_found("todo list", id));
    }

    let jar = flash::push(jar, FlashMessage::success("Todo list deleted."));
    Ok((jar, Redirect::to("/lists")).into_response())
}

/// POST /lists/{id}/complete_all
async fn complete_all(
    SignedIn { username }: SignedIn,
    State(state): State<AppState>,
    ListId(id): ListId,
    jar: SignedCookieJar,
) -> Result<Response, ApiError> {
    let store = TodoStore::new(state.executor(), &username);

    // Nothing matched: an empty list is fine, a missing one is a 404
    if !store.mark_all_done(id).await? {
        load_list(&store, id).await?;
    }

    let jar = flash::push(jar, FlashMessage::success("All todos have been marked as done."));
    Ok((jar, Redirect::to(&format!("/lists/{id}"))).into_response())
}

async fn load_list(store: &TodoStore<'_>, id: i32) -> Result<TodoList, ApiError> {
    store
        .load_todo_list(id)
        .await?
        .ok_or_else(|| ApiError::not_found("todo list", id))
}

/// Todo list routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/lists", get(list_lists).post(create_list))
        .route("/lists/new", get(new_list_form))
        .route("/lists/{id}", get(show_list).post(update_list))
        .route("/lists/{id}/edit", get(edit_list_form))
        .route("/lists/{id}/destroy", post(destroy_list))
        .route("/lists/{id}/complete_all", post(complete_all))
}
