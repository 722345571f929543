//! Database schema
//!
//! The schema is created on first use and tracked via PRAGMA user_version.

use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Table holding version bump facts
pub const TABLE_NAME: &str = "package_versions";

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS package_versions (
        id               INTEGER PRIMARY KEY,
        package          TEXT,
        previous_version TEXT,
        version          TEXT,
        commit_hash      TEXT,
        UNIQUE(package, previous_version, version, commit_hash)
    );
"#;

/// Create the schema if it is missing
pub fn ensure_schema(conn: &Connection) -> crate::error::Result<()> {
    let current_version = get_schema_version(conn)?;

    tracing::info!(
        current_version,
        target_version = SCHEMA_VERSION,
        "Checking database schema"
    );

    conn.execute_batch(SCHEMA)?;

    if current_version < SCHEMA_VERSION {
        conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;
        tracing::info!(version = SCHEMA_VERSION, "Schema created");
    }

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> crate::error::Result<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    Ok(version)
}
