//! Repository implementations for database access
//!
//! Each repository borrows the executor for the length of one request.
//! `TodoStore` additionally captures the signed-in username.

pub mod todos;
pub mod users;

pub use todos::TodoStore;
pub use users::UserRepo;
