use relog_provider::ReleaseRecord;

use super::RenderError;
use crate::entry::ChangelogEntry;

pub(crate) fn render(records: &[ReleaseRecord]) -> Result<String, RenderError> {
    let entries: Vec<ChangelogEntry> = records.iter().map(ChangelogEntry::from_release).collect();
    serde_json::to_string_pretty(&entries)
        .map(|json| format!("{}\n", json))
        .map_err(|e| RenderError::new(format!("JSON serialization failed: {}", e)))
}
