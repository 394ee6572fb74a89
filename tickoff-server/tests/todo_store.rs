//! Store behaviour against a real PostgreSQL database
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p tickoff-server -- --ignored
//!
//! Each test signs up fresh users, so tests can share one database.

use tickoff_server::db::schema;
use tickoff_server::{QueryExecutor, TodoStore, UserRepo};

async fn executor() -> QueryExecutor {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let executor = QueryExecutor::from_url(&url).expect("bad DATABASE_URL");
    schema::migrate(&executor).await.expect("migration failed");
    executor
}

async fn new_user(executor: &QueryExecutor, prefix: &str) -> String {
    let username = format!("{prefix}-{}", uuid::Uuid::new_v4());
    UserRepo::new(executor)
        .upsert(&username, "secret")
        .await
        .expect("user insert failed");
    username
}

async fn list_id(store: &TodoStore<'_>, title: &str) -> i32 {
    store
        .all_todo_lists()
        .await
        .unwrap()
        .into_iter()
        .find(|l| l.title == title)
        .map(|l| l.id)
        .expect("list not found")
}

#[tokio::test]
#[ignore = "requires database"]
async fn authenticate_checks_password() {
    let executor = executor().await;
    let username = new_user(&executor, "auth").await;
    let users = UserRepo::new(&executor);

    assert!(users.authenticate(&username, "secret").await.unwrap());
    assert!(!users.authenticate(&username, "wrong").await.unwrap());
    assert!(!users.authenticate("nobody-at-all", "secret").await.unwrap());
}

#[tokio::test]
#[ignore = "requires database"]
async fn alice_home_scenario() {
    let executor = executor().await;
    let alice = new_user(&executor, "alice").await;
    let store = TodoStore::new(&executor, &alice);

    assert!(store.create_todo_list("Home").await.unwrap());
    let id = list_id(&store, "Home").await;

    assert!(store.add_todo("Buy milk", id).await.unwrap());
    let list = store.load_todo_list(id).await.unwrap().unwrap();
    assert_eq!(list.todos.len(), 1);
    let todo = &list.todos[0];
    assert!(!todo.done);

    assert!(store.toggle_done(id, todo.id).await.unwrap());
    assert!(store.load_todo(id, todo.id).await.unwrap().unwrap().done);

    let list = store.load_todo_list(id).await.unwrap().unwrap();
    assert!(list.is_done());
    assert!(!list.has_undone_todos());
}

#[tokio::test]
#[ignore = "requires database"]
async fn identities_are_isolated() {
    let executor = executor().await;
    let alice = new_user(&executor, "alice").await;
    let bob = new_user(&executor, "bob").await;
    let as_alice = TodoStore::new(&executor, &alice);
    let as_bob = TodoStore::new(&executor, &bob);

    assert!(as_alice.create_todo_list("Private").await.unwrap());
    let id = list_id(&as_alice, "Private").await;
    assert!(as_alice.add_todo("Secret", id).await.unwrap());
    let todo_id = as_alice.load_todo_list(id).await.unwrap().unwrap().todos[0].id;

    assert!(as_bob.all_todo_lists().await.unwrap().is_empty());
    assert!(as_bob.load_todo_list(id).await.unwrap().is_none());
    assert!(as_bob.load_todo(id, todo_id).await.unwrap().is_none());
    assert!(!as_bob.exists_todo_list_title("Private").await.unwrap());

    // Writes against someone else's rows match nothing
    assert!(!as_bob.add_todo("Intruder", id).await.unwrap());
    assert!(!as_bob.toggle_done(id, todo_id).await.unwrap());
    assert!(!as_bob.mark_all_done(id).await.unwrap());
    assert!(!as_bob.set_title(id, "Mine now").await.unwrap());
    assert!(!as_bob.remove_todo(id, todo_id).await.unwrap());
    assert!(!as_bob.delete_todo_list(id).await.unwrap());

    let list = as_alice.load_todo_list(id).await.unwrap().unwrap();
    assert_eq!(list.title, "Private");
    assert_eq!(list.todos.len(), 1);
    assert!(!list.todos[0].done);

    // Titles are unique per owner, not globally
    assert!(as_bob.create_todo_list("Private").await.unwrap());
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_title_returns_false() {
    let executor = executor().await;
    let user = new_user(&executor, "dup").await;
    let store = TodoStore::new(&executor, &user);

    assert!(store.create_todo_list("Groceries").await.unwrap());
    assert!(store.exists_todo_list_title("Groceries").await.unwrap());
    assert!(!store.create_todo_list("Groceries").await.unwrap());
}

#[tokio::test]
#[ignore = "requires database"]
async fn rename_to_taken_title_is_classified() {
    let executor = executor().await;
    let user = new_user(&executor, "rename").await;
    let store = TodoStore::new(&executor, &user);

    store.create_todo_list("Work").await.unwrap();
    store.create_todo_list("Play").await.unwrap();
    let play = list_id(&store, "Play").await;

    let err = store.set_title(play, "Work").await.unwrap_err();
    assert!(tickoff_server::db::is_unique_constraint_violation(&err));

    assert!(store.set_title(play, "Rest").await.unwrap());
    assert_eq!(
        store.load_todo_list(play).await.unwrap().unwrap().title,
        "Rest"
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_then_load_is_absent() {
    let executor = executor().await;
    let user = new_user(&executor, "delete").await;
    let store = TodoStore::new(&executor, &user);

    store.create_todo_list("Temporary").await.unwrap();
    let id = list_id(&store, "Temporary").await;
    store.add_todo("Goes too", id).await.unwrap();

    assert!(store.delete_todo_list(id).await.unwrap());
    assert!(store.load_todo_list(id).await.unwrap().is_none());
    assert!(!store.delete_todo_list(id).await.unwrap());
    assert!(store.load_todo_list(999_999).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn mark_all_done_counts_matched_rows() {
    let executor = executor().await;
    let user = new_user(&executor, "markall").await;
    let store = TodoStore::new(&executor, &user);

    store.create_todo_list("Chores").await.unwrap();
    let id = list_id(&store, "Chores").await;
    assert!(!store.mark_all_done(id).await.unwrap());

    store.add_todo("Dishes", id).await.unwrap();
    store.add_todo("Laundry", id).await.unwrap();

    assert!(store.mark_all_done(id).await.unwrap());
    assert!(store.mark_all_done(id).await.unwrap());

    let list = store.load_todo_list(id).await.unwrap().unwrap();
    assert!(list.todos.iter().all(|t| t.done));
}

#[tokio::test]
#[ignore = "requires database"]
async fn toggle_in_wrong_list_is_false() {
    let executor = executor().await;
    let user = new_user(&executor, "crosslist").await;
    let store = TodoStore::new(&executor, &user);

    store.create_todo_list("First").await.unwrap();
    store.create_todo_list("Second").await.unwrap();
    let first = list_id(&store, "First").await;
    let second = list_id(&store, "Second").await;

    store.add_todo("Only in first", first).await.unwrap();
    let todo_id = store.load_todo_list(first).await.unwrap().unwrap().todos[0].id;

    assert!(!store.toggle_done(second, todo_id).await.unwrap());
    assert!(!store.remove_todo(second, todo_id).await.unwrap());
    assert!(store.load_todo(second, todo_id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn lists_and_todos_follow_ordering_rules() {
    let executor = executor().await;
    let user = new_user(&executor, "order").await;
    let store = TodoStore::new(&executor, &user);

    for title in ["banana", "Apple", "cherry"] {
        store.create_todo_list(title).await.unwrap();
    }
    let apple = list_id(&store, "Apple").await;
    store.add_todo("only", apple).await.unwrap();
    store.mark_all_done(apple).await.unwrap();

    let titles: Vec<String> = store
        .all_todo_lists()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.title)
        .collect();
    assert_eq!(titles, vec!["banana", "cherry", "Apple"]);

    let banana = list_id(&store, "banana").await;
    for title in ["delta", "Alpha", "charlie", "Bravo"] {
        store.add_todo(title, banana).await.unwrap();
    }
    let list = store.load_todo_list(banana).await.unwrap().unwrap();
    let charlie = list.todos.iter().find(|t| t.title == "charlie").unwrap().id;
    store.toggle_done(banana, charlie).await.unwrap();

    let sorted: Vec<String> = store
        .sorted_todos(&list)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(sorted, vec!["Alpha", "Bravo", "delta", "charlie"]);
}
