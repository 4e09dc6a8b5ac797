// Ties the workspace members into the fetch -> filter -> render -> write pipeline.

pub mod compiler;
pub mod error;

pub use compiler::Compiler;
pub use error::{CompileError, ErrorKind, Result};
pub use relog_changelog::{
    extract_changes, filter_releases, render, ChangelogEntry, OutputFormat,
};
pub use relog_config::{Config, RepoId};
pub use relog_provider::{GitHubProvider, ReleaseRecord, ReleaseSource};
pub use relog_utils::http;
