use serde::{Deserialize, Serialize};

/// A published release as returned by the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// Display title of the release. Falls back to the tag when the API
    /// returns no name.
    pub name: String,
    /// Tag identifier, may carry prerelease markers.
    pub tag_name: String,
    /// Publication timestamp as reported by the API (RFC 3339).
    pub published_at: String,
    /// Free-text release notes, usually Markdown with `* ` bullet lines.
    pub body: String,
    pub prerelease: bool,
}
