//! Run configuration from the execution environment.

use std::env;
use std::fmt;

/// Environment variable naming the target repository as `owner/name`.
/// Provided by CI environments on the hosting platform.
pub const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";
/// Environment variable carrying the bearer credential.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// A repository identifier of the form `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn parse(s: &str) -> Result<Self> {
        let (owner, name) = s
            .split_once('/')
            .ok_or_else(|| ConfigError::invalid_repository(s))?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(ConfigError::invalid_repository(s));
        }
        Ok(RepoId {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub repo: RepoId,
    pub token: String,
}

impl Config {
    /// Reads `GITHUB_REPOSITORY` and `GITHUB_TOKEN` from the environment.
    pub fn from_env() -> Result<Self> {
        Self::resolve(None)
    }

    /// Like [`Config::from_env`], but an explicit repository argument takes
    /// precedence over the environment.
    pub fn resolve(repo_arg: Option<&str>) -> Result<Self> {
        let repo_string = match repo_arg {
            Some(repo) => repo.to_string(),
            None => non_blank_var(REPOSITORY_ENV).ok_or_else(ConfigError::missing_repository)?,
        };
        let repo = RepoId::parse(&repo_string)?;
        let token = non_blank_var(TOKEN_ENV).ok_or_else(ConfigError::missing_token)?;
        Ok(Config { repo, token })
    }
}

// A blank variable counts as unset.
fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Error type for configuration loading
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Kinds of configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    MissingRepository,
    MissingToken,
    InvalidRepository,
}

impl ConfigError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn missing_repository() -> Self {
        Self::new(
            ErrorKind::MissingRepository,
            format!("No repository given and {} is not set", REPOSITORY_ENV),
        )
    }

    pub fn missing_token() -> Self {
        Self::new(
            ErrorKind::MissingToken,
            format!("{} is not set", TOKEN_ENV),
        )
    }

    pub fn invalid_repository(value: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::InvalidRepository,
            format!("Repository must be owner/name, got `{}`", value),
        )
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;
