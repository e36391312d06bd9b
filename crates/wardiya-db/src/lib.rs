//! Wardiya Database Layer
//!
//! SQLite-backed key-value persistence for roster viewer state.

pub mod migrations;
pub mod pool;
pub mod queries;
pub mod store;

pub use pool::{DbError, DbPool, DbResult};
pub use store::{KeyValueStore, MemoryStore};

use std::path::Path;

/// Open (or create) the database at `path` and run migrations.
///
/// Parent directories are created when missing.
pub fn init_pool(path: &Path) -> DbResult<DbPool> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = DbPool::open(path)?;
    migrations::run_migrations(&pool)?;
    tracing::debug!(path = %path.display(), "Database initialized");
    Ok(pool)
}

/// Open an in-memory database with migrations applied.
pub fn init_memory_pool() -> DbResult<DbPool> {
    let pool = DbPool::in_memory()?;
    migrations::run_migrations(&pool)?;
    Ok(pool)
}
