//! Statement executor
//!
//! One connection per statement: connect, run, close. No pool, and no
//! session or transaction state carried from one call to the next.

use std::fmt;
use std::str::FromStr;

use futures::TryStreamExt;
use sqlx::postgres::{PgArguments, PgConnectOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Connection, Either, Executor, PgConnection, Postgres};

/// Positional statement parameter, bound as `$1`, `$2`, ...
#[derive(Clone, PartialEq, Eq)]
pub enum SqlParam {
    Int(i32),
    Text(String),
    Bool(bool),
    /// Bound as text but never written to logs
    Secret(String),
}

impl fmt::Debug for SqlParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::Text(v) => f.debug_tuple("Text").field(v).finish(),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Secret(_) => f.write_str("Secret(<redacted>)"),
        }
    }
}

impl SqlParam {
    fn bind_to<'q>(
        self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        match self {
            Self::Int(v) => query.bind(v),
            Self::Text(v) | Self::Secret(v) => query.bind(v),
            Self::Bool(v) => query.bind(v),
        }
    }
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for SqlParam {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Rows returned by a statement plus the affected/returned row count
#[derive(Default)]
pub struct QueryOutput {
    pub rows: Vec<PgRow>,
    pub row_count: u64,
}

/// Runs single parameterized statements on fresh connections.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    options: PgConnectOptions,
}

impl QueryExecutor {
    pub fn new(options: PgConnectOptions) -> Self {
        Self { options }
    }

    /// Parse a `postgres://` URL. Does not connect.
    ///
    /// # Example
    ///
    /// ```
    /// use tickoff_server::db::QueryExecutor;
    ///
    /// assert!(QueryExecutor::from_url("postgres://localhost/todos").is_ok());
    /// ```
    pub fn from_url(database_url: &str) -> Result<Self, sqlx::Error> {
        PgConnectOptions::from_str(database_url).map(Self::new)
    }

    /// Execute one statement on a dedicated connection.
    ///
    /// The connection is closed whether or not the statement succeeds, and
    /// the store's error is returned as-is.
    pub async fn run(&self, sql: &str, params: &[SqlParam]) -> Result<QueryOutput, sqlx::Error> {
        tracing::info!(statement = sql, params = params.len(), "executing statement");
        tracing::debug!(params = ?params, "statement parameters");

        let mut conn = PgConnection::connect_with(&self.options).await?;
        let result = run_on(&mut conn, sql, params).await;

        if let Err(e) = conn.close().await {
            tracing::warn!(error = %e, "connection did not close cleanly");
        }

        result
    }
}

// `fetch_many` is the one call that yields both rows and the affected count.
#[allow(deprecated)]
async fn run_on(
    conn: &mut PgConnection,
    sql: &str,
    params: &[SqlParam],
) -> Result<QueryOutput, sqlx::Error> {
    let query = params
        .iter()
        .cloned()
        .fold(sqlx::query(sql), |query, param| param.bind_to(query));

    let mut output = QueryOutput::default();
    let mut stream = (&mut *conn).fetch_many(query);

    while let Some(item) = stream.try_next().await? {
        match item {
            Either::Left(done) => output.row_count += done.rows_affected(),
            Either::Right(row) => output.rows.push(row),
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[test]
    fn params_from_primitives() {
        assert_eq!(SqlParam::from(7), SqlParam::Int(7));
        assert_eq!(SqlParam::from(true), SqlParam::Bool(true));
        assert_eq!(SqlParam::from("Home"), SqlParam::Text("Home".into()));
        assert_eq!(
            SqlParam::from(String::from("Work")),
            SqlParam::Text("Work".into())
        );
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let params = [
            SqlParam::from("alice"),
            SqlParam::Secret("$2b$12$hashhashhash".into()),
        ];
        let logged = format!("{params:?}");

        assert!(logged.contains("alice"));
        assert!(logged.contains("Secret(<redacted>)"));
        assert!(!logged.contains("hashhashhash"));
    }

    #[test]
    fn rejects_malformed_url() {
        assert!(QueryExecutor::from_url("not a url").is_err());
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p tickoff-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn binds_parameters_positionally() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let executor = QueryExecutor::from_url(&url).expect("bad url");

        let output = executor
            .run(
                "SELECT $1::int AS n, $2::text AS s, $3::bool AS b",
                &[7.into(), "'; DROP TABLE users; --".into(), false.into()],
            )
            .await
            .expect("query failed");

        assert_eq!(output.rows.len(), 1);
        assert_eq!(output.row_count, 1);
        let row = &output.rows[0];
        assert_eq!(row.get::<i32, _>("n"), 7);
        assert_eq!(row.get::<String, _>("s"), "'; DROP TABLE users; --");
        assert!(!row.get::<bool, _>("b"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn store_error_propagates() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let executor = QueryExecutor::from_url(&url).expect("bad url");

        let err = executor
            .run("SELECT * FROM no_such_table", &[])
            .await
            .err()
            .expect("statement should fail");

        assert!(matches!(err, sqlx::Error::Database(_)));
    }
}
