use anyhow::Context;
use diesel::{
    connection::SimpleConnection,
    prelude::*,
    sql_query,
    sql_types::{BigInt, Text},
};

const SCHEMA_VERSION_TABLE: &str = "CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY NOT NULL
);";

/// Numbered schema steps. Tables are only created when missing and views are
/// rebuilt, so a database built by hand still migrates cleanly.
const MIGRATIONS: &[(i32, &str)] = &[
    (1, include_str!("../../migrations/001_hospital_schema.sql")),
    (2, include_str!("../../migrations/002_user_sessions.sql")),
];

#[derive(QueryableByName)]
struct Count {
    #[sql_type = "BigInt"]
    count: i64,
}

pub fn latest_version() -> i32 {
    MIGRATIONS.last().map_or(0, |(version, _)| *version)
}

pub fn current_version(conn: &SqliteConnection) -> anyhow::Result<i32> {
    use crate::schema::schema_version;

    let version = schema_version::table
        .select(diesel::dsl::max(schema_version::version))
        .first::<Option<i32>>(conn)
        .context("Failed to read schema version")?;
    Ok(version.unwrap_or(0))
}

/// Apply every migration newer than the recorded schema version.
pub fn run_migrations(conn: &SqliteConnection) -> anyhow::Result<()> {
    use crate::schema::schema_version;

    conn.batch_execute(SCHEMA_VERSION_TABLE)
        .context("Failed to create schema_version")?;
    let current = current_version(conn)?;

    for &(version, sql) in MIGRATIONS {
        if version <= current {
            continue;
        }
        tracing::info!("Running migration v{}", version);
        conn.transaction::<_, anyhow::Error, _>(|| {
            conn.batch_execute(sql)
                .with_context(|| format!("Migration v{} failed", version))?;
            diesel::insert_into(schema_version::table)
                .values(schema_version::version.eq(version))
                .execute(conn)
                .context("Failed to record schema version")?;
            Ok(())
        })?;
    }

    Ok(())
}

fn count_objects(conn: &SqliteConnection, kind: &str) -> anyhow::Result<i64> {
    let res = sql_query(
        "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = ? AND name NOT LIKE 'sqlite_%'",
    )
    .bind::<Text, _>(kind)
    .get_result::<Count>(conn)
    .context("Failed to inspect schema")?;
    Ok(res.count)
}

pub fn count_tables(conn: &SqliteConnection) -> anyhow::Result<i64> {
    count_objects(conn, "table")
}

pub fn count_views(conn: &SqliteConnection) -> anyhow::Result<i64> {
    count_objects(conn, "view")
}
