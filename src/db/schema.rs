use anyhow::{Context, Result};
use rusqlite::Connection;

const SCHEMA_VERSION: i64 = 1;
const COMPANY_SCHEMA: &str = include_str!("company.sql");
const COMPANY_TABLES: [&str; 3] = ["tbdepartments", "tbemployees", "tbprojects"];

/// Install the company tables once and record the schema version.
///
/// A database that already holds all three company tables (provisioned by
/// hand) is adopted as is. A partial one gets the missing tables created.
pub fn ensure_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        )",
    )
    .context("Failed to create schema_version table")?;

    if recorded_version(conn)?.is_some_and(|v| v >= SCHEMA_VERSION) {
        return Ok(());
    }

    let found = company_table_count(conn)?;
    let tx = conn.transaction()?;

    if found == COMPANY_TABLES.len() {
        tracing::info!("Adopting existing company tables as schema v{}", SCHEMA_VERSION);
    } else {
        tracing::info!(
            "Installing company schema v{} ({} of {} tables present)",
            SCHEMA_VERSION,
            found,
            COMPANY_TABLES.len()
        );
        tx.execute_batch(COMPANY_SCHEMA)
            .context("Failed to install company schema")?;
    }

    tx.execute(
        "INSERT INTO schema_version (version, applied_at) VALUES (?, ?)",
        (SCHEMA_VERSION, chrono::Utc::now().to_rfc3339()),
    )?;
    tx.commit()?;
    Ok(())
}

fn recorded_version(conn: &Connection) -> Result<Option<i64>> {
    let version = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })?;
    Ok(version)
}

fn company_table_count(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN (?, ?, ?)",
        COMPANY_TABLES,
        |row| row.get(0),
    )?;
    Ok(count as usize)
}
