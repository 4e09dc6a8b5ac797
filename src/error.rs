//! Error types for the compile pipeline

use std::fmt;

/// Error type for a changelog compilation run
#[derive(Debug, Clone)]
pub struct CompileError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Kinds of compilation errors. All of them are terminal; the pipeline has no
/// partial-success mode and no retry path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed environment input.
    Configuration,
    /// Remote quota exhausted. Reported as-is, never retried.
    RateLimit,
    /// Any other failing interaction with the releases API.
    Http,
    /// A render target failed to serialize.
    Render,
    /// The output file could not be written.
    FileSystem,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimit, message)
    }

    pub fn http(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Http, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Render, message)
    }

    pub fn file_system(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FileSystem, message)
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for CompileError {}

impl From<relog_config::ConfigError> for CompileError {
    fn from(err: relog_config::ConfigError) -> Self {
        Self::configuration(err.message)
    }
}

impl From<relog_provider::FetchError> for CompileError {
    fn from(err: relog_provider::FetchError) -> Self {
        match err.kind {
            relog_provider::ErrorKind::RateLimit => Self::rate_limit(err.message),
            _ => Self::http(err.message),
        }
    }
}

impl From<relog_changelog::RenderError> for CompileError {
    fn from(err: relog_changelog::RenderError) -> Self {
        Self::render(err.message)
    }
}

impl From<std::io::Error> for CompileError {
    fn from(err: std::io::Error) -> Self {
        Self::file_system(err.to_string())
    }
}

/// Result type for compilation runs
pub type Result<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_kinds_map_onto_compile_kinds() {
        let err: CompileError = relog_provider::FetchError::rate_limit("quota").into();
        assert_eq!(err.kind, ErrorKind::RateLimit);

        let err: CompileError = relog_provider::FetchError::http(404, "url").into();
        assert_eq!(err.kind, ErrorKind::Http);

        let err: CompileError = relog_provider::FetchError::network("refused").into();
        assert_eq!(err.kind, ErrorKind::Http);
    }

    #[test]
    fn test_config_error_maps_onto_configuration() {
        let err: CompileError = relog_config::ConfigError::missing_token().into();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }

    #[test]
    fn test_io_error_maps_onto_file_system() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CompileError = io.into();
        assert_eq!(err.kind, ErrorKind::FileSystem);
    }
}
