pub mod config;
pub mod migrate;
pub mod serve;
pub mod user;

pub use config::{run_config, ConfigArgs};
pub use migrate::{run_migrate, MigrateArgs};
pub use serve::{run_serve, ServeArgs};
pub use user::{run_user, UserArgs};
