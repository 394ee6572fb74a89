//! Database error type and duplicate-key classification

use sqlx::error::ErrorKind;

/// SQLSTATE for `unique_violation`
const UNIQUE_VIOLATION_SQLSTATE: &str = "23505";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// True when the store rejected a write because of a duplicate key.
pub fn is_unique_constraint_violation(err: &DbError) -> bool {
    match err {
        DbError::Sqlx(e) => is_unique_violation(e),
        _ => false,
    }
}

/// Classify a raw sqlx error: structured kind, then SQLSTATE, then message.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    let sqlx::Error::Database(db) = err else {
        return false;
    };

    if matches!(db.kind(), ErrorKind::UniqueViolation) {
        return true;
    }

    if db.code().as_deref() == Some(UNIQUE_VIOLATION_SQLSTATE) {
        return true;
    }

    message_reports_duplicate_key(db.message())
}

// Last resort for drivers that expose neither kind nor SQLSTATE.
fn message_reports_duplicate_key(message: &str) -> bool {
    message.to_ascii_lowercase().contains("duplicate key")
}
