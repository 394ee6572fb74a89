//! Route modules

pub mod health;
pub mod lists;
pub mod todos;
pub mod users;
