//! HTTP layer
//!
//! Axum server with:
//! - Signed-cookie session and flash messages
//! - Askama-rendered pages
//! - Request tracing
//! - Graceful shutdown

pub mod error;
pub mod extractors;
pub mod flash;
pub mod routes;
pub mod server;
pub mod session;
pub mod templates;

pub use error::ApiError;
pub use server::{build_router, run_server, ServerConfig, ServerError};
