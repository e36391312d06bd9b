//! Key-value state queries.

use crate::pool::{DbPool, DbResult};
use rusqlite::{params, OptionalExtension};

/// Read a value by key.
pub fn get_value(pool: &DbPool, key: &str) -> DbResult<Option<String>> {
    pool.with_conn(|conn| {
        let value = conn
            .query_row(
                "SELECT value FROM kv_state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    })
}

/// Insert or replace a value.
pub fn set_value(pool: &DbPool, key: &str, value: &str) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO kv_state (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    })
}

/// Delete a value. Returns whether a row was removed.
pub fn delete_value(pool: &DbPool, key: &str) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let affected = conn.execute("DELETE FROM kv_state WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    })
}
