pub mod entry;
pub mod filter;
pub mod render;

// Re-export common types
pub use entry::{extract_changes, ChangelogEntry};
pub use filter::filter_releases;
pub use render::{format_date, render, OutputFormat, RenderError};
