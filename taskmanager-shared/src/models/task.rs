/// Task model and database operations
///
/// Every task belongs to exactly one user, fixed at creation. New tasks start
/// out not completed, and their slug is derived once from the title.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     title TEXT NOT NULL,
///     content TEXT NOT NULL,
///     priority INTEGER NOT NULL DEFAULT 0,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     user_id INTEGER NOT NULL REFERENCES users (id),
///     slug TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskmanager_shared::models::task::{Task, CreateTask};
/// use sqlx::SqliteConnection;
///
/// # async fn example(conn: &mut SqliteConnection, user_id: i64) -> Result<(), sqlx::Error> {
/// let task = Task::create(conn, user_id, CreateTask {
///     title: "Write report".to_string(),
///     content: "Quarterly numbers".to_string(),
///     priority: 2,
/// }).await?;
///
/// assert!(!task.completed);
/// assert_eq!(task.slug, "write-report");
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use tracing::{debug, info};
use validator::Validate;

use crate::slug::slugify;

/// Task model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Store-assigned task ID
    pub id: i64,

    pub title: String,

    pub content: String,

    pub priority: i32,

    /// False at creation, only changed through an update
    pub completed: bool,

    /// Owning user, never reassigned
    pub user_id: i64,

    /// Slug of the title at creation time
    pub slug: String,
}

/// Input for creating a new task
///
/// The owner is passed separately; a `completed` flag in the input is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    pub content: String,

    pub priority: i32,
}

/// Input for updating a task
///
/// Every field is replaced; the slug keeps its creation-time value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    pub content: String,

    pub priority: i32,

    pub completed: bool,
}

impl Task {
    /// Lists every task, ordered by ID
    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, content, priority, completed, user_id, slug
            FROM tasks
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(tasks)
    }

    /// Lists the tasks owned by a user, ordered by ID
    ///
    /// Returns an empty list for an unknown user.
    pub async fn list_by_user(
        conn: &mut SqliteConnection,
        user_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, content, priority, completed, user_id, slug
            FROM tasks
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(tasks)
    }

    /// Finds a task by ID
    pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, content, priority, completed, user_id, slug
            FROM tasks
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(task)
    }

    /// Creates a task owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns a foreign key violation if `user_id` does not reference an
    /// existing user.
    pub async fn create(
        conn: &mut SqliteConnection,
        user_id: i64,
        data: CreateTask,
    ) -> Result<Self, sqlx::Error> {
        let slug = slugify(&data.title);
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, content, priority, completed, user_id, slug)
            VALUES (?, ?, ?, FALSE, ?, ?)
            RETURNING id, title, content, priority, completed, user_id, slug
            "#,
        )
        .bind(data.title)
        .bind(data.content)
        .bind(data.priority)
        .bind(user_id)
        .bind(slug)
        .fetch_one(&mut *conn)
        .await?;

        info!(task_id = task.id, user_id, slug = %task.slug, "Task created");
        Ok(task)
    }

    /// Replaces a task's title, content, priority and completion flag
    ///
    /// # Returns
    ///
    /// The updated task, None if no task has this ID
    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = ?, content = ?, priority = ?, completed = ?
            WHERE id = ?
            RETURNING id, title, content, priority, completed, user_id, slug
            "#,
        )
        .bind(data.title)
        .bind(data.content)
        .bind(data.priority)
        .bind(data.completed)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        if task.is_some() {
            debug!(task_id = id, "Task updated");
        }

        Ok(task)
    }

    /// Deletes a task by ID
    ///
    /// # Returns
    ///
    /// True if the task was deleted, false if it didn't exist
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            debug!(task_id = id, "Task deleted");
        }

        Ok(deleted)
    }

    /// Deletes every task owned by a user in one statement
    ///
    /// # Returns
    ///
    /// The number of tasks removed
    pub async fn delete_by_user(conn: &mut SqliteConnection, user_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
