//! Ingestion pipeline: git history in, version bump facts out
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────┐
//! │  GitLog  │ ─►│ sanitize │ ─►│ parse_records│ ─►│ extract_all  │ ─►│ Database │
//! │ (git log)│   │          │   │   (YAML)     │   │   (regex)    │   │ (SQLite) │
//! └──────────┘   └──────────┘   └──────────────┘   └──────────────┘   └──────────┘
//! ```
//!
//! Every stage takes the complete output of the previous one. Nothing is
//! written until the whole log has parsed, so a parse failure leaves the
//! store untouched.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bumpmine_core::{Database, Pipeline};
//!
//! let mut db = Database::open(&path)?;
//! db.migrate()?;
//! let summary = Pipeline::from_repo("./nixpkgs").run(&mut db, &path)?;
//! println!("{} new facts", summary.facts_inserted);
//! ```

pub mod extract;
pub mod record;

pub use extract::{extract_all, extract_bumps, extract_facts};
pub use record::{parse_records, COMMIT_TEMPLATE, TEMPLATE_VERSION};

use crate::db::Database;
use crate::error::Result;
use crate::git::GitLog;
use crate::sanitize::sanitize;
use crate::types::{RunSummary, VersionBumpFact};
use std::path::{Path, PathBuf};

/// Where the raw log text comes from.
#[derive(Debug, Clone)]
pub enum LogSource {
    /// Run `git log` in a repository
    Repository(PathBuf),
    /// Read previously captured `git log` output from a file
    Capture(PathBuf),
}

impl LogSource {
    /// Raw, unsanitized log text
    pub fn read(&self) -> Result<String> {
        match self {
            LogSource::Repository(path) => GitLog::new(path).read_log(),
            LogSource::Capture(path) => {
                tracing::info!(path = %path.display(), "Reading captured log");
                let bytes = std::fs::read(path)?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }
}

/// Facts pulled from a log, not yet stored.
#[derive(Debug, Default)]
pub struct Extraction {
    pub commits_parsed: usize,
    pub facts: Vec<VersionBumpFact>,
}

impl Extraction {
    fn summary(&self) -> RunSummary {
        RunSummary {
            commits_parsed: self.commits_parsed,
            facts_extracted: self.facts.len(),
            ..Default::default()
        }
    }
}

/// Sanitize, parse and extract facts from raw log text.
pub fn extract_from_log(raw: &str) -> Result<Extraction> {
    let clean = sanitize(raw);
    tracing::debug!(
        raw_bytes = raw.len(),
        clean_bytes = clean.len(),
        "Sanitized log"
    );

    let commits = parse_records(&clean)?;
    let facts = extract_all(&commits);

    tracing::info!(
        commits = commits.len(),
        facts = facts.len(),
        "Extracted version bumps"
    );

    Ok(Extraction {
        commits_parsed: commits.len(),
        facts,
    })
}

/// Store extracted facts in `db`.
///
/// `store_path` is only recorded in the summary.
pub fn store(extraction: Extraction, db: &mut Database, store_path: &Path) -> Result<RunSummary> {
    let stats = db.insert_facts(&extraction.facts)?;

    Ok(RunSummary {
        facts_inserted: stats.inserted,
        facts_skipped: stats.skipped,
        store_path: Some(store_path.to_path_buf()),
        ..extraction.summary()
    })
}

/// Run the full pipeline over raw log text, storing into `db`.
pub fn ingest_log(raw: &str, db: &mut Database, store_path: &Path) -> Result<RunSummary> {
    let extraction = extract_from_log(raw)?;
    store(extraction, db, store_path)
}

/// One configured pipeline run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    source: LogSource,
}

impl Pipeline {
    pub fn new(source: LogSource) -> Self {
        Self { source }
    }

    /// Pipeline reading `git log` from a repository
    pub fn from_repo(repo_path: impl Into<PathBuf>) -> Self {
        Self::new(LogSource::Repository(repo_path.into()))
    }

    /// Read and extract without touching any store.
    pub fn extract(&self) -> Result<Extraction> {
        let raw = self.source.read()?;
        extract_from_log(&raw)
    }

    /// Extract only; the summary carries no store path.
    pub fn dry_run(&self) -> Result<(RunSummary, Vec<VersionBumpFact>)> {
        let extraction = self.extract()?;
        Ok((extraction.summary(), extraction.facts))
    }

    /// Read, extract and store.
    pub fn run(&self, db: &mut Database, store_path: &Path) -> Result<RunSummary> {
        let raw = self.source.read()?;
        ingest_log(&raw, db, store_path)
    }
}
