//! Signed-cookie session: the signed-in username and a signed-in flag

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, Key, SameSite};
use axum_extra::extract::SignedCookieJar;

use super::flash::{self, FlashMessage};
use crate::state::AppState;

pub const SIGNIN_PATH: &str = "/users/signin";

const USERNAME_COOKIE: &str = "username";
const SIGNED_IN_COOKIE: &str = "signed_in";

/// Identity of the signed-in user.
///
/// Rejects with a redirect to the sign-in page when there is no session.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub username: String,
}

impl FromRequestParts<AppState> for SignedIn {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = match SignedCookieJar::<Key>::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };

        if let Some(username) = current_user(&jar) {
            return Ok(Self { username });
        }

        tracing::debug!(path = %parts.uri.path(), "no session, redirecting to sign in");
        let jar = flash::push(jar, FlashMessage::error("You must be signed in to do that."));
        Err((jar, Redirect::to(SIGNIN_PATH)).into_response())
    }
}

/// Username bound to the session, if signed in.
pub fn current_user(jar: &SignedCookieJar) -> Option<String> {
    let signed_in = jar
        .get(SIGNED_IN_COOKIE)
        .is_some_and(|cookie| cookie.value() == "true");

    if !signed_in {
        return None;
    }

    let cookie = jar.get(USERNAME_COOKIE)?;
    urlencoding::decode(cookie.value())
        .ok()
        .map(|name| name.into_owned())
        .filter(|name| !name.is_empty())
}

/// Bind `username` and the signed-in flag to the session.
pub fn sign_in(jar: SignedCookieJar, username: &str) -> SignedCookieJar {
    jar.add(session_cookie(
        USERNAME_COOKIE,
        urlencoding::encode(username).into_owned(),
    ))
    .add(session_cookie(SIGNED_IN_COOKIE, "true".to_string()))
}

/// Clear both session values.
pub fn sign_out(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(USERNAME_COOKIE).path("/"))
        .remove(Cookie::build(SIGNED_IN_COOKIE).path("/"))
}

fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jar() -> SignedCookieJar {
        SignedCookieJar::new(Key::generate())
    }

    #[test]
    fn no_session_by_default() {
        assert_eq!(current_user(&jar()), None);
    }

    #[test]
    fn sign_in_binds_username() {
        let jar = sign_in(jar(), "alice smith");
        assert_eq!(current_user(&jar).as_deref(), Some("alice smith"));
    }

    #[test]
    fn sign_out_clears_session() {
        let jar = sign_out(sign_in(jar(), "alice"));
        assert_eq!(current_user(&jar), None);
    }
}
