//! Custom Axum extractors for numeric path identifiers

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;

/// Extract a todo list id from `/lists/{id}/...`
pub struct ListId(pub i32);

impl<S> FromRequestParts<S> for ListId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::not_found("todo list", "?"))?;

        parse_id(&id, "todo list").map(Self)
    }
}

/// Extract `(list id, todo id)` from `/lists/{id}/todos/{todo_id}/...`
pub struct TodoPath {
    pub list_id: i32,
    pub todo_id: i32,
}

impl<S> FromRequestParts<S> for TodoPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((list_id, todo_id)): Path<(String, String)> =
            Path::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::not_found("todo", "?"))?;

        Ok(Self {
            list_id: parse_id(&list_id, "todo list")?,
            todo_id: parse_id(&todo_id, "todo")?,
        })
    }
}

// Anything that is not an i32 cannot name a row, so it is a 404.
fn parse_id(raw: &str, resource: &'static str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::not_found(resource, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integers() {
        assert_eq!(parse_id("42", "todo").unwrap(), 42);
    }

    #[test]
    fn rejects_non_integers() {
        assert!(matches!(
            parse_id("abc", "todo"),
            Err(ApiError::NotFound { resource: "todo", .. })
        ));
        assert!(parse_id("99999999999", "todo").is_err());
    }
}
