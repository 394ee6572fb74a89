//! Todo lists and todos
//!
//! Rows are fetched fresh for every call; nothing here is written back.
//! A list's done status is derived from its attached todos.

use serde::Serialize;
use sqlx::FromRow;

/// Todo record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub done: bool,
    pub todolist_id: i32,
    pub username: String,
}

/// Todo list record with its todos attached in memory
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TodoList {
    pub id: i32,
    pub title: String,
    pub username: String,
    #[sqlx(skip)]
    pub todos: Vec<Todo>,
}

impl TodoList {
    /// True iff the list has at least one todo and every todo is done.
    pub fn is_done(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(|todo| todo.done)
    }

    /// True iff at least one todo is not done.
    pub fn has_undone_todos(&self) -> bool {
        self.todos.iter().any(|todo| !todo.done)
    }

    /// Number of todos not yet done.
    pub fn undone_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.done).count()
    }

    /// Attach todos whose `todolist_id` matches this list, keeping their order.
    pub fn attach_todos<'a>(&mut self, todos: impl IntoIterator<Item = &'a Todo>) {
        self.todos.extend(
            todos
                .into_iter()
                .filter(|todo| todo.todolist_id == self.id)
                .cloned(),
        );
    }
}

/// Stable partition: lists that are not done first, then done lists.
///
/// Each group keeps the order it was fetched in; title ordering comes from
/// the query, not from here.
pub fn partition_by_done(lists: Vec<TodoList>) -> Vec<TodoList> {
    let (done, mut undone): (Vec<_>, Vec<_>) = lists.into_iter().partition(TodoList::is_done);
    undone.extend(done);
    undone
}
