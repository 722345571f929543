//! Database layer for bumpmine
//!
//! A single SQLite table, `package_versions`, holding one row per distinct
//! (package, previous_version, version, commit_hash). Rows are only ever
//! inserted; re-inserting an existing quadruple is a silent no-op.

pub mod repo;
pub mod schema;

pub use repo::{Database, InsertStats};
