pub mod data;
pub mod error;
pub mod github;

// Re-export common types
pub use data::ReleaseRecord;
pub use error::{ErrorKind, FetchError};
pub use github::{GitHubProvider, ReleaseSource, GITHUB_API_URL};
