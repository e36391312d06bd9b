//! Schema migrations.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite_migration::{Migrations, M};

/// Ordered schema steps. Append only; never edit a released step.
const STEPS: &[&str] = &[include_str!("schema.sql")];

fn migrations() -> Migrations<'static> {
    Migrations::new(STEPS.iter().copied().map(M::up).collect())
}

/// Bring the schema up to date.
pub fn run_migrations(pool: &DbPool) -> DbResult<()> {
    let migrations = migrations();
    pool.with_conn_mut(|conn| {
        migrations
            .to_latest(conn)
            .map_err(|e| DbError::Migration(e.to_string()))
    })
}
