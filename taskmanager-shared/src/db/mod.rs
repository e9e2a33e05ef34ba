/// Persistence layer
///
/// - `pool`: SQLite connection pool management with health checks
/// - `migrations`: embedded schema and its runner
///
/// Models live in the `models` module at crate root level and operate on a
/// single `SqliteConnection`, which callers obtain from the pool once per
/// request.

pub mod migrations;
pub mod pool;
