use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use relog_provider::ReleaseRecord;

static BULLET_LINE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\*\s+(.*)$").unwrap());

/// A changelog entry derived from a single release record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangelogEntry {
    pub version: String,
    pub release_date: String,
    pub changes: Vec<String>,
}

impl ChangelogEntry {
    pub fn from_release(record: &ReleaseRecord) -> Self {
        ChangelogEntry {
            version: record.name.clone(),
            release_date: record.published_at.clone(),
            changes: extract_changes(&record.body),
        }
    }
}

/// Splits release notes into change lines via the `* <text>` bullet pattern,
/// trimming trailing whitespace. A body without bullet lines becomes a single
/// change; an empty body yields no changes.
pub fn extract_changes(body: &str) -> Vec<String> {
    let changes: Vec<String> = body
        .lines()
        .filter_map(|line| {
            BULLET_LINE_REGEX
                .captures(line)
                .map(|captures| captures[1].trim_end().to_string())
        })
        .collect();
    if !changes.is_empty() {
        return changes;
    }
    let body = body.trim();
    if body.is_empty() {
        vec![]
    } else {
        vec![body.to_string()]
    }
}
