//! Sign in / sign out

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use crate::db::UserRepo;
use crate::http::error::ApiError;
use crate::http::flash::{self, FlashMessage};
use crate::http::session::{self, SIGNIN_PATH};
use crate::http::templates::{HtmlTemplate, SigninTemplate};
use crate::state::AppState;

/// Sign-in form body
#[derive(Deserialize)]
pub struct SigninForm {
    pub username: String,
    pub password: String,
}

/// GET /users/signin
async fn signin_form(jar: SignedCookieJar) -> Response {
    let signed_in_as = session::current_user(&jar);
    let (jar, flashes) = flash::take(jar);

    (
        jar,
        HtmlTemplate(SigninTemplate {
            signed_in_as,
            flashes,
            username: String::new(),
        }),
    )
        .into_response()
}

/// POST /users/signin
async fn signin(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<SigninForm>,
) -> Result<Response, ApiError> {
    let username = form.username.trim();
    let authenticated = UserRepo::new(state.executor())
        .authenticate(username, &form.password)
        .await?;

    if !authenticated {
        tracing::info!(username, "sign in rejected");
        return Ok(HtmlTemplate(SigninTemplate {
            signed_in_as: None,
            flashes: vec![FlashMessage::error("Invalid credentials.")],
            username: form.username,
        })
        .into_response());
    }

    tracing::info!(username, "signed in");
    let jar = session::sign_in(jar, username);
    let jar = flash::push(jar, FlashMessage::info("Welcome!"));
    Ok((jar, Redirect::to("/lists")).into_response())
}

/// POST /users/signout
async fn signout(jar: SignedCookieJar) -> Response {
    let jar = session::sign_out(jar);
    let jar = flash::push(jar, FlashMessage::info("You have been signed out."));
    (jar, Redirect::to(SIGNIN_PATH)).into_response()
}

/// User routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route(SIGNIN_PATH, get(signin_form).post(signin))
        .route("/users/signout", post(signout))
}
