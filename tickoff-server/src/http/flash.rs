//! Flash messages carried across a redirect.
//!
//! Messages are queued in a signed cookie and consumed by the next page that
//! renders them. Form re-renders pass messages straight to the template
//! instead.

use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::SignedCookieJar;
use serde::{Deserialize, Serialize};

const FLASH_COOKIE: &str = "flash";

/// One queued message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    /// "success", "error" or "info"; used as a CSS class
    pub kind: String,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: "error".to_string(),
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: "info".to_string(),
            message: message.into(),
        }
    }
}

/// Queue a message for the next rendered page.
pub fn push(jar: SignedCookieJar, flash: FlashMessage) -> SignedCookieJar {
    let mut queued = read(&jar);
    queued.push(flash);

    let json = serde_json::to_string(&queued).unwrap_or_default();
    let cookie = Cookie::build((FLASH_COOKIE, urlencoding::encode(&json).into_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    jar.add(cookie)
}

/// Drain queued messages, clearing the cookie.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Vec<FlashMessage>) {
    let queued = read(&jar);
    if queued.is_empty() {
        return (jar, queued);
    }

    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), queued)
}

// Tampered or malformed cookies are treated as empty.
fn read(jar: &SignedCookieJar) -> Vec<FlashMessage> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| {
            let json = urlencoding::decode(cookie.value()).ok()?;
            serde_json::from_str(&json).ok()
        })
        .unwrap_or_default()
}
