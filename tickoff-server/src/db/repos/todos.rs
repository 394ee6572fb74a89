//! Todo list and todo storage for one signed-in user
//!
//! Handles list/todo CRUD with:
//! - Every statement filtered by the captured username
//! - Paired reads issued concurrently (see `load_todo_list`)
//! - Duplicate list titles reported as `false`, not as errors

use sqlx::postgres::PgRow;
use sqlx::FromRow;

use crate::db::error::is_unique_violation;
use crate::db::{DbError, QueryExecutor, SqlParam};
use crate::models::{partition_by_done, Todo, TodoList};

const SELECT_LISTS: &str = r#"
    SELECT id, title, username
    FROM todolists
    WHERE username = $1
    ORDER BY lower(title) ASC
"#;

const SELECT_ALL_TODOS: &str = r#"
    SELECT id, title, done, todolist_id, username
    FROM todos
    WHERE username = $1
    ORDER BY done ASC, lower(title) ASC
"#;

const SELECT_LIST: &str = r#"
    SELECT id, title, username
    FROM todolists
    WHERE id = $1 AND username = $2
"#;

const SELECT_LIST_TODOS: &str = r#"
    SELECT id, title, done, todolist_id, username
    FROM todos
    WHERE todolist_id = $1 AND username = $2
    ORDER BY done ASC, lower(title) ASC
"#;

/// Identity-scoped store, built per request.
pub struct TodoStore<'a> {
    executor: &'a QueryExecutor,
    username: &'a str,
}

impl<'a> TodoStore<'a> {
    pub fn new(executor: &'a QueryExecutor, username: &'a str) -> Self {
        Self { executor, username }
    }

    /// All lists with their todos, not-done lists first.
    ///
    /// Lists and todos are two independent statements run concurrently, not
    /// a transaction: a write landing between them can show up in one and
    /// not the other.
    pub async fn all_todo_lists(&self) -> Result<Vec<TodoList>, DbError> {
        let params = [self.user()];
        let (lists, todos) = tokio::try_join!(
            self.executor.run(SELECT_LISTS, &params),
            self.executor.run(SELECT_ALL_TODOS, &params),
        )?;

        let todos: Vec<Todo> = decode(&todos.rows)?;
        let mut lists: Vec<TodoList> = decode(&lists.rows)?;
        for list in &mut lists {
            list.attach_todos(&todos);
        }

        Ok(partition_by_done(lists))
    }

    /// Todos of `list`, not-done first, then by case-insensitive title.
    pub async fn sorted_todos(&self, list: &TodoList) -> Result<Vec<Todo>, DbError> {
        let output = self
            .executor
            .run(SELECT_LIST_TODOS, &[list.id.into(), self.user()])
            .await?;

        Ok(decode(&output.rows)?)
    }

    /// Load one list with its todos, or `None` if it is missing or not owned.
    ///
    /// Same relaxed consistency as `all_todo_lists`.
    pub async fn load_todo_list(&self, id: i32) -> Result<Option<TodoList>, DbError> {
        let params = [SqlParam::from(id), self.user()];
        let (list, todos) = tokio::try_join!(
            self.executor.run(SELECT_LIST, &params),
            self.executor.run(SELECT_LIST_TODOS, &params),
        )?;

        let Some(row) = list.rows.first() else {
            return Ok(None);
        };

        let mut list = TodoList::from_row(row)?;
        list.todos = decode(&todos.rows)?;
        Ok(Some(list))
    }

    pub async fn load_todo(&self, list_id: i32, todo_id: i32) -> Result<Option<Todo>, DbError> {
        let output = self
            .executor
            .run(
                r#"
                SELECT id, title, done, todolist_id, username
                FROM todos
                WHERE todolist_id = $1 AND id = $2 AND username = $3
                "#,
                &[list_id.into(), todo_id.into(), self.user()],
            )
            .await?;

        Ok(output.rows.first().map(Todo::from_row).transpose()?)
    }

    /// Flip a todo's done flag. False if no matching todo.
    pub async fn toggle_done(&self, list_id: i32, todo_id: i32) -> Result<bool, DbError> {
        self.affects_rows(
            r#"
            UPDATE todos SET done = NOT done
            WHERE todolist_id = $1 AND id = $2 AND username = $3
            "#,
            &[list_id.into(), todo_id.into(), self.user()],
        )
        .await
    }

    pub async fn remove_todo(&self, list_id: i32, todo_id: i32) -> Result<bool, DbError> {
        self.affects_rows(
            "DELETE FROM todos WHERE todolist_id = $1 AND id = $2 AND username = $3",
            &[list_id.into(), todo_id.into(), self.user()],
        )
        .await
    }

    /// Mark every todo in the list done.
    ///
    /// True iff at least one todo matched, including ones already done.
    pub async fn mark_all_done(&self, list_id: i32) -> Result<bool, DbError> {
        self.affects_rows(
            "UPDATE todos SET done = true WHERE todolist_id = $1 AND username = $2",
            &[list_id.into(), self.user()],
        )
        .await
    }

    /// Add a todo to a list owned by this user. False if the list is
    /// missing or belongs to someone else.
    pub async fn add_todo(&self, title: &str, list_id: i32) -> Result<bool, DbError> {
        self.affects_rows(
            r#"
            INSERT INTO todos (title, todolist_id, username)
            SELECT $1, id, username
            FROM todolists
            WHERE id = $2 AND username = $3
            "#,
            &[title.into(), list_id.into(), self.user()],
        )
        .await
    }

    /// Delete a list; its todos go with it.
    pub async fn delete_todo_list(&self, id: i32) -> Result<bool, DbError> {
        self.affects_rows(
            "DELETE FROM todolists WHERE id = $1 AND username = $2",
            &[id.into(), self.user()],
        )
        .await
    }

    pub async fn exists_todo_list_title(&self, title: &str) -> Result<bool, DbError> {
        let output = self
            .executor
            .run(
                "SELECT 1 FROM todolists WHERE username = $1 AND title = $2",
                &[self.user(), title.into()],
            )
            .await?;

        Ok(!output.rows.is_empty())
    }

    /// Create a list. A duplicate title yields `Ok(false)`, even when a
    /// prior `exists_todo_list_title` check raced with another insert.
    pub async fn create_todo_list(&self, title: &str) -> Result<bool, DbError> {
        let result = self
            .executor
            .run(
                "INSERT INTO todolists (title, username) VALUES ($1, $2)",
                &[title.into(), self.user()],
            )
            .await;

        match result {
            Ok(output) => Ok(output.row_count > 0),
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!(username = self.username, title, "duplicate list title");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Rename a list. A duplicate title surfaces as an error; classify it
    /// with `is_unique_constraint_violation`.
    pub async fn set_title(&self, list_id: i32, title: &str) -> Result<bool, DbError> {
        self.affects_rows(
            "UPDATE todolists SET title = $1 WHERE id = $2 AND username = $3",
            &[title.into(), list_id.into(), self.user()],
        )
        .await
    }

    async fn affects_rows(&self, sql: &str, params: &[SqlParam]) -> Result<bool, DbError> {
        let output = self.executor.run(sql, params).await?;
        Ok(output.row_count > 0)
    }

    fn user(&self) -> SqlParam {
        self.username.into()
    }
}

fn decode<T>(rows: &[PgRow]) -> Result<Vec<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    rows.iter().map(T::from_row).collect()
}
