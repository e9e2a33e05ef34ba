/// User model and database operations
///
/// A user owns any number of tasks. The username is unique (enforced by the
/// store, checked first by the API for a friendlier error) and the slug is
/// derived from it once, at creation.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     username TEXT NOT NULL UNIQUE,
///     firstname TEXT NOT NULL,
///     lastname TEXT NOT NULL,
///     age INTEGER NOT NULL,
///     slug TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskmanager_shared::models::user::{User, CreateUser};
/// use taskmanager_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::in_memory()).await?;
/// let mut conn = pool.acquire().await?;
///
/// let user = User::create(&mut conn, CreateUser {
///     username: "Jöhn Doe".to_string(),
///     firstname: "John".to_string(),
///     lastname: "Doe".to_string(),
///     age: 30,
/// }).await?;
///
/// assert_eq!(user.slug, "john-doe");
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::{Connection, SqliteConnection};
use tracing::{debug, info};
use validator::Validate;

use super::task::Task;
use crate::slug::slugify;

/// User model representing a task owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Store-assigned user ID
    pub id: i64,

    /// Unique login name, immutable after creation
    pub username: String,

    pub firstname: String,

    pub lastname: String,

    pub age: i32,

    /// Slug of `username`, fixed at creation
    pub slug: String,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 255, message = "Username must be 1-255 characters"))]
    pub username: String,

    #[validate(length(max = 255, message = "First name must be at most 255 characters"))]
    pub firstname: String,

    #[validate(length(max = 255, message = "Last name must be at most 255 characters"))]
    pub lastname: String,

    #[validate(range(min = 0, max = 200, message = "Age must be between 0 and 200"))]
    pub age: i32,
}

/// Input for updating an existing user
///
/// Every field is replaced. `username` and `slug` cannot be changed.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(max = 255, message = "First name must be at most 255 characters"))]
    pub firstname: String,

    #[validate(length(max = 255, message = "Last name must be at most 255 characters"))]
    pub lastname: String,

    #[validate(range(min = 0, max = 200, message = "Age must be between 0 and 200"))]
    pub age: i32,
}

impl User {
    /// Lists every user, ordered by ID
    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, firstname, lastname, age, slug
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(users)
    }

    /// Finds a user by ID
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, firstname, lastname, age, slug
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(user)
    }

    /// Finds a user by exact username
    pub async fn find_by_username(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, firstname, lastname, age, slug
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(user)
    }

    /// Whether a user with this ID exists
    pub async fn exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new user, deriving its slug from the username
    ///
    /// # Errors
    ///
    /// Returns a database error with a unique violation if the username is
    /// already taken.
    pub async fn create(conn: &mut SqliteConnection, data: CreateUser) -> Result<Self, sqlx::Error> {
        let slug = slugify(&data.username);

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, firstname, lastname, age, slug)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, username, firstname, lastname, age, slug
            "#,
        )
        .bind(data.username)
        .bind(data.firstname)
        .bind(data.lastname)
        .bind(data.age)
        .bind(slug)
        .fetch_one(&mut *conn)
        .await?;

        info!(user_id = user.id, slug = %user.slug, "User created");
        Ok(user)
    }

    /// Replaces a user's names and age
    ///
    /// # Returns
    ///
    /// The updated user, None if no user has this ID
    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET firstname = ?, lastname = ?, age = ?
            WHERE id = ?
            RETURNING id, username, firstname, lastname, age, slug
            "#,
        )
        .bind(data.firstname)
        .bind(data.lastname)
        .bind(data.age)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        if user.is_some() {
            debug!(user_id = id, "User updated");
        }

        Ok(user)
    }

    /// Deletes a user together with every task it owns
    ///
    /// Both deletes share one transaction. The first statement is a write,
    /// so the transaction holds the write lock from the start; a deferred
    /// transaction that read first could not upgrade after another
    /// connection committed (`SQLITE_BUSY_SNAPSHOT` under WAL).
    ///
    /// The user delete doubles as the lookup: when it matches no row the
    /// transaction is rolled back, and the task delete before it matched
    /// nothing either since tasks cannot outlive their owner.
    ///
    /// # Returns
    ///
    /// The number of tasks removed, None if no user has this ID
    pub async fn delete_with_tasks(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = conn.begin().await?;

        let tasks_removed = Task::delete_by_user(&mut tx, id).await?;

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;

        info!(user_id = id, tasks_removed, "User deleted");
        Ok(Some(tasks_removed))
    }
}
