//! Database repository layer
//!
//! Insert and read operations for version bump facts.

use crate::error::Result;
use crate::types::{StoredFact, VersionBumpFact};
use rusqlite::{params, Connection, Row};
use std::path::Path;

/// Outcome of a batch insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertStats {
    /// Rows newly written
    pub inserted: usize,
    /// Facts already present, left untouched
    pub skipped: usize,
}

/// Handle to the fact store (single connection, single writer)
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Rollback journal keeps the store a single file.
        conn.execute_batch(
            "
            PRAGMA journal_mode = DELETE;
            PRAGMA synchronous = FULL;
            ",
        )?;

        tracing::debug!(path = %path.display(), "Opened database");
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Ensure the schema exists
    pub fn migrate(&self) -> Result<()> {
        super::schema::ensure_schema(&self.conn)
    }

    /// Get the underlying connection (for advanced use)
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    // ============================================
    // Fact operations
    // ============================================

    /// Insert facts, skipping any already stored.
    ///
    /// Runs in one transaction committed after the last fact; an error
    /// part way through leaves the store as it was before the call.
    pub fn insert_facts(&mut self, facts: &[VersionBumpFact]) -> Result<InsertStats> {
        let tx = self.conn.transaction()?;
        let mut stats = InsertStats::default();

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO package_versions (package, previous_version, version, commit_hash)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )?;

            for fact in facts {
                let changed = stmt.execute(params![
                    fact.package,
                    fact.previous_version,
                    fact.new_version,
                    fact.commit_hash,
                ])?;

                if changed > 0 {
                    stats.inserted += 1;
                } else {
                    tracing::trace!(
                        package = %fact.package,
                        commit = %fact.commit_hash,
                        "Fact already stored"
                    );
                    stats.skipped += 1;
                }
            }
        }

        tx.commit()?;

        tracing::info!(
            inserted = stats.inserted,
            skipped = stats.skipped,
            "Stored version bump facts"
        );
        Ok(stats)
    }

    /// Number of stored facts
    pub fn count_facts(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM package_versions", [], |r| r.get(0))?;
        Ok(count)
    }

    /// All stored facts, oldest row first
    pub fn list_facts(&self) -> Result<Vec<StoredFact>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, package, previous_version, version, commit_hash
            FROM package_versions
            ORDER BY id
            "#,
        )?;

        let facts = stmt
            .query_map([], row_to_stored_fact)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(facts)
    }
}

fn row_to_stored_fact(row: &Row) -> rusqlite::Result<StoredFact> {
    Ok(StoredFact {
        id: row.get(0)?,
        package: row.get(1)?,
        previous_version: row.get(2)?,
        version: row.get(3)?,
        commit_hash: row.get(4)?,
    })
}
