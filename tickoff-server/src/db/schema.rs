//! Schema creation for users, todo lists, and todos

use super::{DbError, QueryExecutor};

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        username TEXT PRIMARY KEY,
        password TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS todolists (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        username TEXT NOT NULL REFERENCES users (username) ON DELETE CASCADE,
        UNIQUE (username, title)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS todos (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        done BOOLEAN NOT NULL DEFAULT false,
        todolist_id INTEGER NOT NULL REFERENCES todolists (id) ON DELETE CASCADE,
        username TEXT NOT NULL REFERENCES users (username) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS todos_todolist_id_idx ON todos (todolist_id)",
];

/// Create any missing tables. Safe to run repeatedly.
pub async fn migrate(executor: &QueryExecutor) -> Result<(), DbError> {
    tracing::info!("Running schema migrations...");

    for statement in STATEMENTS {
        executor.run(statement, &[]).await?;
    }

    tracing::info!(statements = STATEMENTS.len(), "Schema up to date");
    Ok(())
}
