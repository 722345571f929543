//! Core domain types for bumpmine
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Commit** | One change in the source repository, identified by its full hash |
//! | **Version bump** | A `package: old -> new` triple found in a commit message |
//! | **Fact** | A version bump tagged with the commit it came from |
//! | **Stored fact** | A fact persisted in the `package_versions` table |
//!
//! Commits and facts live only for one pipeline run. Stored facts are
//! append-only: nothing in this crate updates or deletes them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================
// Commits
// ============================================

/// One document of the commit record stream.
///
/// Field names match the record template emitted by `git log`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full commit hash
    #[serde(rename = "commit")]
    pub hash: String,
    /// Commit subject, as carried by the literal block
    pub message: String,
}

// ============================================
// Version bumps
// ============================================

/// A version transition found in free text, not yet tied to a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionBump {
    pub package: String,
    pub previous_version: String,
    pub new_version: String,
}

/// A version bump attributed to the commit whose message contained it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VersionBumpFact {
    pub package: String,
    pub previous_version: String,
    pub new_version: String,
    pub commit_hash: String,
}

impl VersionBumpFact {
    /// Tag a bump with its owning commit.
    pub fn from_bump(bump: VersionBump, commit_hash: &str) -> Self {
        Self {
            package: bump.package,
            previous_version: bump.previous_version,
            new_version: bump.new_version,
            commit_hash: commit_hash.to_string(),
        }
    }
}

/// A row of the `package_versions` table.
///
/// The column is named `version` in the store; it holds the new version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFact {
    pub id: i64,
    pub package: String,
    pub previous_version: String,
    pub version: String,
    pub commit_hash: String,
}

// ============================================
// Run results
// ============================================

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Commit records parsed from the log
    pub commits_parsed: usize,
    /// Facts extracted across all commits
    pub facts_extracted: usize,
    /// Rows newly written to the store
    pub facts_inserted: usize,
    /// Facts already present in the store
    pub facts_skipped: usize,
    /// Store written to; `None` on dry runs
    pub store_path: Option<PathBuf>,
}

impl RunSummary {
    /// Whether the store was left untouched.
    pub fn is_dry_run(&self) -> bool {
        self.store_path.is_none()
    }

    /// Pretty-printed JSON form, as printed by `--format json`.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
