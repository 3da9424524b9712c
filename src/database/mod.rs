pub mod migrations;
pub mod seed;

use crate::DbPool;
use anyhow::Context;
use diesel::{
    connection::SimpleConnection,
    r2d2::{self, ConnectionManager, CustomizeConnection, PooledConnection},
    Connection, SqliteConnection,
};

const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;";

/// Applied to every pooled connection; SQLite keeps these per connection.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(CONNECTION_PRAGMAS)
            .map_err(r2d2::Error::QueryError)
    }
}

pub fn build_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .context("Failed to create pool")
}

/// A single connection outside the pool, used for setup and in tests.
pub fn establish(database_url: &str) -> anyhow::Result<SqliteConnection> {
    let conn = SqliteConnection::establish(database_url)
        .with_context(|| format!("Failed to open database {}", database_url))?;
    conn.batch_execute(CONNECTION_PRAGMAS)
        .context("Failed to configure connection")?;
    Ok(conn)
}

pub fn get_db_conn(
    pool: &DbPool,
) -> anyhow::Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
    pool.get().context("DB connection")
}

#[cfg(test)]
pub fn test_conn() -> SqliteConnection {
    let conn = establish(":memory:").unwrap();
    migrations::run_migrations(&conn).unwrap();
    conn
}

/// A single pooled connection, so every checkout sees the same in-memory
/// database.
#[cfg(test)]
pub fn test_pool() -> DbPool {
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(ConnectionManager::<SqliteConnection>::new(":memory:"))
        .unwrap();
    migrations::run_migrations(&pool.get().unwrap()).unwrap();
    pool
}
