use once_cell::sync::Lazy;
use regex::Regex;

use relog_provider::ReleaseRecord;

use super::markdown;

static HEADING_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*#{1,6}\s+").unwrap());

/// Markdown content with heading markers stripped and newlines collapsed to
/// spaces within an entry. The transformation is lossy.
pub(crate) fn render(records: &[ReleaseRecord]) -> String {
    let entries: Vec<String> = records
        .iter()
        .map(|record| {
            let entry = markdown::render_entry(record);
            let stripped = HEADING_MARKER_REGEX.replace_all(&entry, "");
            stripped.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .collect();
    if entries.is_empty() {
        String::new()
    } else {
        format!("{}\n", entries.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(name: &str, body: &str) -> ReleaseRecord {
        ReleaseRecord {
            name: name.to_string(),
            tag_name: name.to_string(),
            published_at: "2024-03-03T10:00:00Z".to_string(),
            body: body.to_string(),
            prerelease: false,
        }
    }

    #[test]
    fn test_render_strips_heading_markers_and_flattens() {
        let records = vec![release("v1.1", "## Highlights\nFixed the parser\nFaster startup")];
        assert_eq!(
            render(&records),
            "v1.1 - 2024-03-03 Highlights Fixed the parser Faster startup\n"
        );
    }

    #[test]
    fn test_render_keeps_entries_separated() {
        let records = vec![release("v1.1", "* A"), release("v1.0", "* B")];
        assert_eq!(
            render(&records),
            "v1.1 - 2024-03-03 * A\n\nv1.0 - 2024-03-03 * B\n"
        );
    }

    #[test]
    fn test_render_empty_input() {
        assert_eq!(render(&[]), "");
    }
}
