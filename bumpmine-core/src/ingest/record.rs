//! Commit record stream parsing
//!
//! `git log` is asked to print every commit as a small YAML document:
//!
//! ```text
//! ---
//! commit: "<full hash>"
//! message: |
//!   <subject>
//! ```
//!
//! [`COMMIT_TEMPLATE`] is the only place that shape is written down. The log
//! extractor hands it to git and this module parses what comes back, so any
//! change to one side has to bump [`TEMPLATE_VERSION`] and update the other.
//!
//! Input must already be sanitized: tabs and control characters inside a
//! subject would otherwise be read as YAML structure.

use crate::error::{Error, Result};
use crate::types::CommitRecord;
use serde::Deserialize;

/// Revision of the record template shared with the log extractor.
pub const TEMPLATE_VERSION: u32 = 1;

/// `git log --pretty=format:` template producing one YAML document per commit.
pub const COMMIT_TEMPLATE: &str = "---%ncommit: \"%H\"%nmessage: |%n  %s";

/// The `--pretty` argument to pass to `git log`.
pub fn pretty_format_arg() -> String {
    format!("--pretty=format:{}", COMMIT_TEMPLATE)
}

/// Parse a sanitized document stream into commit records, in stream order.
///
/// Blank input yields no records. The first malformed document aborts the
/// whole parse with [`Error::Parse`]; no partial result is returned.
pub fn parse_records(text: &str) -> Result<Vec<CommitRecord>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let record = CommitRecord::deserialize(document).map_err(|e| parse_error(text, e))?;
        records.push(record);
    }

    tracing::debug!(records = records.len(), "Parsed commit records");
    Ok(records)
}

fn parse_error(text: &str, err: serde_yaml::Error) -> Error {
    let fragment = match err.location() {
        Some(location) => document_at(text, location.index()),
        None => text,
    };

    tracing::error!(error = %err, "Failed to parse commit record stream");

    Error::Parse {
        message: err.to_string(),
        fragment: fragment.to_string(),
    }
}

fn is_separator(line: &str) -> bool {
    let line = line.trim_end();
    line == "---" || line.starts_with("--- ")
}

/// The `---`-delimited document containing byte offset `index`.
fn document_at(text: &str, index: usize) -> &str {
    let index = index.min(text.len());
    let mut start = 0;
    let mut end = text.len();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if is_separator(line) {
            if offset <= index {
                start = offset;
            } else {
                end = offset;
                break;
            }
        }
        offset += line.len();
    }

    &text[start..end]
}
