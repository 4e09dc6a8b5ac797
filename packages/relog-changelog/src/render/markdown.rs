use relog_provider::ReleaseRecord;

use super::entry_title;

pub(crate) fn render(records: &[ReleaseRecord]) -> String {
    let entries: Vec<String> = records.iter().map(render_entry).collect();
    if entries.is_empty() {
        String::new()
    } else {
        format!("{}\n", entries.join("\n\n"))
    }
}

pub(crate) fn render_entry(record: &ReleaseRecord) -> String {
    let title = format!("## {}", entry_title(record));
    let body = record.body.trim();
    if body.is_empty() {
        title
    } else {
        format!("{}\n\n{}", title, body)
    }
}
