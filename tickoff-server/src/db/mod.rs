//! Database layer - statement executor, schema, and repositories
//!
//! # Design Principles
//!
//! - One connection per statement (no pool, no cross-statement session state)
//! - Every list/todo query filters by the caller's username
//! - Rely on DB constraints for title uniqueness, classify the conflict

pub mod error;
pub mod executor;
pub mod repos;
pub mod schema;

pub use error::{is_unique_constraint_violation, DbError};
pub use executor::{QueryExecutor, QueryOutput, SqlParam};
pub use repos::{TodoStore, UserRepo};
