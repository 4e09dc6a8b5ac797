//! Error types for release fetching

use std::fmt;

/// Error type for release fetch operations
#[derive(Debug, Clone)]
pub struct FetchError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Kinds of fetch errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The remote API quota is exhausted. Terminal, never retried.
    RateLimit,
    /// Any other non-success HTTP status.
    Http,
    /// The request itself failed (connection, TLS, bad URL).
    Network,
    /// The response body was not the expected JSON shape.
    Parse,
}

impl FetchError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimit, message)
    }

    pub fn http(status: u16, url: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::Http,
            format!("Unexpected status {} from {}", status, url),
        )
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

/// Result type for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;
