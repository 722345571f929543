//! Version bump extraction from commit messages
//!
//! Matches `package: old -> new` anywhere in a message. The match is a
//! heuristic over free text: package and version tokens are not validated,
//! so any colon-and-arrow shaped text counts.

use crate::types::{CommitRecord, VersionBump, VersionBumpFact};
use regex::Regex;
use std::sync::OnceLock;

/// Package name (word chars, optionally hyphen-joined), colon, version,
/// ` -> `, version.
pub const BUMP_PATTERN: &str = r"(\w+(?:-\w+)*): ([\w.]+) -> ([\w.]+)";

fn bump_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(BUMP_PATTERN).expect("bump pattern is valid"))
}

/// Every non-overlapping bump in `message`, left to right.
pub fn extract_bumps(message: &str) -> Vec<VersionBump> {
    bump_regex()
        .captures_iter(message)
        .map(|caps| VersionBump {
            package: caps[1].to_string(),
            previous_version: caps[2].to_string(),
            new_version: caps[3].to_string(),
        })
        .collect()
}

/// Bumps in a commit's message, tagged with the commit hash.
pub fn extract_facts(commit: &CommitRecord) -> Vec<VersionBumpFact> {
    extract_bumps(&commit.message)
        .into_iter()
        .map(|bump| VersionBumpFact::from_bump(bump, &commit.hash))
        .collect()
}

/// Facts for all commits, in commit order.
pub fn extract_all(commits: &[CommitRecord]) -> Vec<VersionBumpFact> {
    commits.iter().flat_map(extract_facts).collect()
}
