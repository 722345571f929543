//! # bumpmine-core
//!
//! Core library for bumpmine: mines `package: old -> new` version bumps out
//! of a git history and records them in SQLite.
//!
//! This library provides:
//! - Domain types for commits and version bump facts
//! - The ingestion pipeline (git log, sanitization, parsing, extraction)
//! - Database storage layer with SQLite
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use bumpmine_core::{Config, Database, Pipeline};
//!
//! let config = Config::load().expect("failed to load config");
//! let store_path = config.store_path();
//!
//! let mut db = Database::open(&store_path).expect("failed to open database");
//! db.migrate().expect("failed to create schema");
//!
//! let summary = Pipeline::from_repo(&config.repository.path)
//!     .run(&mut db, &store_path)
//!     .expect("pipeline failed");
//! println!("{} new facts", summary.facts_inserted);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use db::{Database, InsertStats};
pub use error::{Error, Result};
pub use ingest::{LogSource, Pipeline};
pub use types::*;

// Public modules
pub mod config;
pub mod db;
pub mod error;
pub mod git;
pub mod ingest;
pub mod logging;
pub mod sanitize;
pub mod types;
