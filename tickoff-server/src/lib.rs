//! tickoff-server: per-user todo lists behind a server-rendered UI
//!
//! - `db`: connection-per-statement executor and the identity-scoped store
//! - `models`: todo lists, todos, and title validation
//! - `http`: axum routes, signed-cookie sessions, flash messages

pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use db::{DbError, QueryExecutor, TodoStore, UserRepo};
pub use http::{build_router, run_server, ServerConfig};
pub use models::{Todo, TodoList};
pub use state::AppState;
