//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::db::QueryExecutor;

/// Shared application state
///
/// Holds no identity; each request builds its own `TodoStore`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    executor: QueryExecutor,
    cookie_key: Key,
}

impl AppState {
    pub fn new(executor: QueryExecutor, cookie_key: Key) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                executor,
                cookie_key,
            }),
        }
    }

    pub fn executor(&self) -> &QueryExecutor {
        &self.inner.executor
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.inner.cookie_key.clone()
    }
}
