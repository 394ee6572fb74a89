//! User credentials
//!
//! Sign-in happens before an identity is bound, so these calls take the
//! username explicitly instead of going through `TodoStore`.

use once_cell::sync::Lazy;
use sqlx::Row;
use tokio::task;

use crate::db::{DbError, QueryExecutor, SqlParam};

/// Hash verified against when the user does not exist, so both paths pay
/// for one bcrypt comparison.
static ABSENT_USER_HASH: Lazy<String> =
    Lazy::new(|| bcrypt::hash("tickoff-absent-user", bcrypt::DEFAULT_COST).unwrap_or_default());

/// User repository
pub struct UserRepo<'a> {
    executor: &'a QueryExecutor,
}

impl<'a> UserRepo<'a> {
    pub fn new(executor: &'a QueryExecutor) -> Self {
        Self { executor }
    }

    /// Check a username/password pair against the stored bcrypt hash.
    ///
    /// Unknown users and wrong passwords both yield `Ok(false)`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool, DbError> {
        let output = self
            .executor
            .run(
                "SELECT password FROM users WHERE username = $1",
                &[username.into()],
            )
            .await?;

        let stored: Option<String> = output
            .rows
            .first()
            .map(|row| row.try_get::<String, _>("password"))
            .transpose()?;

        let exists = stored.is_some();
        let hash = stored.unwrap_or_else(|| ABSENT_USER_HASH.clone());
        let password = password.to_owned();

        let verified = task::spawn_blocking(move || bcrypt::verify(password, &hash)).await?;

        if !exists {
            return Ok(false);
        }

        Ok(verified?)
    }

    /// Create a user or replace their password.
    pub async fn upsert(&self, username: &str, password: &str) -> Result<(), DbError> {
        let password = password.to_owned();
        let hash = task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
            .await??;

        self.executor
            .run(
                r#"
                INSERT INTO users (username, password) VALUES ($1, $2)
                ON CONFLICT (username) DO UPDATE SET password = EXCLUDED.password
                "#,
                &[username.into(), SqlParam::Secret(hash)],
            )
            .await?;

        tracing::info!(username, "user credentials stored");
        Ok(())
    }
}
