/// Database models for the task manager
///
/// # Models
///
/// - `user`: task owners; deleting one removes its tasks
/// - `task`: to-do items, each owned by one user
///
/// Every operation takes the `SqliteConnection` of the current request
/// rather than the pool, so one request never holds more than one
/// connection.

pub mod task;
pub mod user;
