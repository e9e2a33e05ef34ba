/// Integration tests for the User and Task models
///
/// Each test runs against its own in-memory database with the schema applied.

use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqlitePool};
use taskmanager_shared::db::migrations::run_migrations;
use taskmanager_shared::db::pool::{create_pool, DatabaseConfig};
use taskmanager_shared::models::task::{CreateTask, Task, UpdateTask};
use taskmanager_shared::models::user::{CreateUser, UpdateUser, User};
use taskmanager_shared::slug::slugify;

async fn setup() -> (SqlitePool, PoolConnection<Sqlite>) {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");
    run_migrations(&pool).await.expect("Migrations failed");
    let conn = pool.acquire().await.expect("Failed to acquire connection");
    (pool, conn)
}

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        firstname: "John".to_string(),
        lastname: "Doe".to_string(),
        age: 30,
    }
}

fn new_task(title: &str) -> CreateTask {
    CreateTask {
        title: title.to_string(),
        content: "content".to_string(),
        priority: 1,
    }
}

#[tokio::test]
async fn test_create_user_is_retrievable_with_slug() {
    let (_pool, mut conn) = setup().await;

    let created = User::create(&mut conn, new_user("Jöhn Doe")).await.unwrap();
    let found = User::find_by_id(&mut conn, created.id).await.unwrap().unwrap();

    assert_eq!(found, created);
    assert_eq!(found.username, "Jöhn Doe");
    assert_eq!(found.firstname, "John");
    assert_eq!(found.lastname, "Doe");
    assert_eq!(found.age, 30);
    assert_eq!(found.slug, slugify("Jöhn Doe"));
    assert_eq!(found.slug, "john-doe");
}

#[tokio::test]
async fn test_duplicate_username_is_unique_violation() {
    let (_pool, mut conn) = setup().await;

    User::create(&mut conn, new_user("jdoe")).await.unwrap();
    let err = User::create(&mut conn, new_user("jdoe")).await.unwrap_err();

    let db_err = err.as_database_error().expect("Expected a database error");
    assert!(db_err.is_unique_violation());
    assert_eq!(User::list(&mut conn).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_find_by_username() {
    let (_pool, mut conn) = setup().await;

    let created = User::create(&mut conn, new_user("alice")).await.unwrap();

    let found = User::find_by_username(&mut conn, "alice").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(created.id));
    assert!(User::find_by_username(&mut conn, "bob").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_users_ordered_by_id() {
    let (_pool, mut conn) = setup().await;

    let a = User::create(&mut conn, new_user("a")).await.unwrap();
    let b = User::create(&mut conn, new_user("b")).await.unwrap();

    let ids: Vec<i64> = User::list(&mut conn).await.unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
}

#[tokio::test]
async fn test_update_user_keeps_username_and_slug() {
    let (_pool, mut conn) = setup().await;

    let created = User::create(&mut conn, new_user("Jane Roe")).await.unwrap();
    let updated = User::update(
        &mut conn,
        created.id,
        UpdateUser {
            firstname: "Janet".to_string(),
            lastname: "Row".to_string(),
            age: 41,
        },
    )
    .await
    .unwrap()
    .expect("User should exist");

    assert_eq!(updated.firstname, "Janet");
    assert_eq!(updated.lastname, "Row");
    assert_eq!(updated.age, 41);
    assert_eq!(updated.username, "Jane Roe");
    assert_eq!(updated.slug, "jane-roe");
}

#[tokio::test]
async fn test_update_missing_user_returns_none() {
    let (_pool, mut conn) = setup().await;

    let other = User::create(&mut conn, new_user("keep")).await.unwrap();
    let result = User::update(
        &mut conn,
        other.id + 100,
        UpdateUser {
            firstname: "X".to_string(),
            lastname: "Y".to_string(),
            age: 1,
        },
    )
    .await
    .unwrap();

    assert!(result.is_none());
    let unchanged = User::find_by_id(&mut conn, other.id).await.unwrap().unwrap();
    assert_eq!(unchanged, other);
}

#[tokio::test]
async fn test_create_task_defaults() {
    let (_pool, mut conn) = setup().await;

    let user = User::create(&mut conn, new_user("owner")).await.unwrap();
    let task = Task::create(&mut conn, user.id, new_task("Buy Crème Fraîche!"))
        .await
        .unwrap();

    assert!(!task.completed);
    assert_eq!(task.user_id, user.id);
    assert_eq!(task.slug, "buy-creme-fraiche");
    assert_eq!(Task::find_by_id(&mut conn, task.id).await.unwrap(), Some(task));
}

#[tokio::test]
async fn test_create_task_for_missing_user_fails() {
    let (_pool, mut conn) = setup().await;

    let err = Task::create(&mut conn, 999, new_task("orphan")).await.unwrap_err();

    let db_err = err.as_database_error().expect("Expected a database error");
    assert!(db_err.is_foreign_key_violation());
    assert!(Task::list(&mut conn).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_task_keeps_slug() {
    let (_pool, mut conn) = setup().await;

    let user = User::create(&mut conn, new_user("owner")).await.unwrap();
    let task = Task::create(&mut conn, user.id, new_task("Original title")).await.unwrap();

    let updated = Task::update(
        &mut conn,
        task.id,
        UpdateTask {
            title: "New title".to_string(),
            content: "new content".to_string(),
            priority: 5,
            completed: true,
        },
    )
    .await
    .unwrap()
    .expect("Task should exist");

    assert_eq!(updated.title, "New title");
    assert_eq!(updated.content, "new content");
    assert_eq!(updated.priority, 5);
    assert!(updated.completed);
    assert_eq!(updated.slug, "original-title");
    assert_eq!(updated.user_id, user.id);
}

#[tokio::test]
async fn test_update_missing_task_returns_none() {
    let (_pool, mut conn) = setup().await;

    let result = Task::update(
        &mut conn,
        42,
        UpdateTask {
            title: "t".to_string(),
            content: "c".to_string(),
            priority: 1,
            completed: true,
        },
    )
    .await
    .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_list_by_user_and_delete() {
    let (_pool, mut conn) = setup().await;

    let alice = User::create(&mut conn, new_user("alice")).await.unwrap();
    let bob = User::create(&mut conn, new_user("bob")).await.unwrap();
    let a1 = Task::create(&mut conn, alice.id, new_task("a1")).await.unwrap();
    let a2 = Task::create(&mut conn, alice.id, new_task("a2")).await.unwrap();
    Task::create(&mut conn, bob.id, new_task("b1")).await.unwrap();

    let alice_tasks = Task::list_by_user(&mut conn, alice.id).await.unwrap();
    assert_eq!(alice_tasks, vec![a1.clone(), a2.clone()]);
    assert!(Task::list_by_user(&mut conn, 12345).await.unwrap().is_empty());

    assert!(Task::delete(&mut conn, a1.id).await.unwrap());
    assert!(!Task::delete(&mut conn, a1.id).await.unwrap());
    assert_eq!(Task::list_by_user(&mut conn, alice.id).await.unwrap(), vec![a2]);
    assert_eq!(Task::list(&mut conn).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_user_removes_owned_tasks() {
    let (_pool, mut conn) = setup().await;

    let alice = User::create(&mut conn, new_user("alice")).await.unwrap();
    let bob = User::create(&mut conn, new_user("bob")).await.unwrap();
    let a1 = Task::create(&mut conn, alice.id, new_task("a1")).await.unwrap();
    let a2 = Task::create(&mut conn, alice.id, new_task("a2")).await.unwrap();
    let b1 = Task::create(&mut conn, bob.id, new_task("b1")).await.unwrap();

    let removed = User::delete_with_tasks(&mut conn, alice.id).await.unwrap();
    assert_eq!(removed, Some(2));

    assert!(User::find_by_id(&mut conn, alice.id).await.unwrap().is_none());
    assert!(Task::list_by_user(&mut conn, alice.id).await.unwrap().is_empty());
    assert!(Task::find_by_id(&mut conn, a1.id).await.unwrap().is_none());
    assert!(Task::find_by_id(&mut conn, a2.id).await.unwrap().is_none());
    assert_eq!(Task::find_by_id(&mut conn, b1.id).await.unwrap(), Some(b1));
}

#[tokio::test]
async fn test_delete_missing_user_touches_nothing() {
    let (_pool, mut conn) = setup().await;

    let alice = User::create(&mut conn, new_user("alice")).await.unwrap();
    Task::create(&mut conn, alice.id, new_task("a1")).await.unwrap();

    let removed = User::delete_with_tasks(&mut conn, alice.id + 1).await.unwrap();
    assert_eq!(removed, None);

    assert_eq!(User::list(&mut conn).await.unwrap().len(), 1);
    assert_eq!(Task::list(&mut conn).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_user_without_tasks() {
    let (_pool, mut conn) = setup().await;

    let user = User::create(&mut conn, new_user("lonely")).await.unwrap();

    assert_eq!(User::delete_with_tasks(&mut conn, user.id).await.unwrap(), Some(0));
    assert!(!User::exists(&mut conn, user.id).await.unwrap());
}
