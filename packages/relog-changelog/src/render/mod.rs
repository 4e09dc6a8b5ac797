mod json;
mod markdown;
mod plain;
mod rtf;

use std::fmt;
use std::str::FromStr;

use chrono::DateTime;

use relog_provider::ReleaseRecord;

/// Changelog output targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Text,
    Json,
    Rtf,
}

impl OutputFormat {
    /// Conventional file name in the working directory for each target.
    pub fn default_output_path(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "CHANGELOG.md",
            OutputFormat::Text => "CHANGELOG.txt",
            OutputFormat::Json => "changelog.json",
            OutputFormat::Rtf => "CHANGELOG.rtf",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "text" | "txt" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "rtf" => Ok(OutputFormat::Rtf),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Rtf => "rtf",
        };
        write!(f, "{}", name)
    }
}

/// Error type for render operations
#[derive(Debug, Clone)]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Render failed: {}", self.message)
    }
}

impl std::error::Error for RenderError {}

/// Renders filtered release records into the requested format. Pure; writing
/// the result anywhere is the caller's business.
pub fn render(records: &[ReleaseRecord], format: OutputFormat) -> Result<String, RenderError> {
    match format {
        OutputFormat::Markdown => Ok(markdown::render(records)),
        OutputFormat::Text => Ok(plain::render(records)),
        OutputFormat::Json => json::render(records),
        OutputFormat::Rtf => Ok(rtf::render(records)),
    }
}

/// `published_at` shown as a date when it parses as RFC 3339, verbatim
/// otherwise.
pub fn format_date(published_at: &str) -> String {
    DateTime::parse_from_rfc3339(published_at)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| published_at.to_string())
}

pub(crate) fn entry_title(record: &ReleaseRecord) -> String {
    format!("{} - {}", record.name, format_date(&record.published_at))
}
