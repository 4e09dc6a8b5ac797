use once_cell::sync::Lazy;
use regex::Regex;

use relog_provider::ReleaseRecord;

// Internal build channels that never belong in a user-facing changelog.
static EXCLUDED_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)experimental|updater").unwrap());

/// Drops prereleases and internal build channels, preserving the order the
/// API returned. The exclusion match keys on `tag_name`.
pub fn filter_releases(records: Vec<ReleaseRecord>) -> Vec<ReleaseRecord> {
    records
        .into_iter()
        .filter(|record| is_publishable(record))
        .collect()
}

fn is_publishable(record: &ReleaseRecord) -> bool {
    !record.prerelease && !EXCLUDED_TAG_REGEX.is_match(&record.tag_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(tag_name: &str, prerelease: bool) -> ReleaseRecord {
        ReleaseRecord {
            name: tag_name.to_string(),
            tag_name: tag_name.to_string(),
            published_at: "2024-03-03T10:00:00Z".to_string(),
            body: "* A".to_string(),
            prerelease,
        }
    }

    #[test]
    fn test_filter_drops_prereleases() {
        let records = vec![release("v1.1", false), release("v1.2-rc1", true)];
        let kept = filter_releases(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].tag_name, "v1.1");
        assert!(kept.iter().all(|record| !record.prerelease));
    }

    #[test]
    fn test_filter_drops_excluded_tags_case_insensitively() {
        let records = vec![
            release("v1.1", false),
            release("v1.0-experimental", false),
            release("v0.9-EXPERIMENTAL", false),
            release("updater-2.0", false),
            release("Updater-legacy", false),
        ];
        let kept = filter_releases(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].tag_name, "v1.1");
    }

    #[test]
    fn test_filter_keys_on_tag_name_not_name() {
        let mut record = release("v2.0", false);
        record.name = "Experimental build".to_string();
        let kept = filter_releases(vec![record]);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_filter_preserves_order() {
        let records = vec![
            release("v1.2", false),
            release("v1.2-beta", true),
            release("v1.1", false),
            release("v1.0", false),
        ];
        let kept = filter_releases(records);
        let tags: Vec<&str> = kept.iter().map(|record| record.tag_name.as_str()).collect();
        assert_eq!(tags, vec!["v1.2", "v1.1", "v1.0"]);
    }
}
