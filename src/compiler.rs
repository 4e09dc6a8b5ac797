use std::path::Path;

use log::{debug, info};

use relog_changelog::{filter_releases, render, OutputFormat};
use relog_config::Config;
use relog_provider::{GitHubProvider, ReleaseSource};

use crate::error::Result;

/// The release-to-changelog pipeline: fetch -> filter -> render -> write,
/// executed once per invocation and aborting on the first error.
pub struct Compiler {
    config: Config,
    source: Box<dyn ReleaseSource>,
}

impl Compiler {
    pub fn new(config: Config) -> Self {
        Self::with_source(config, Box::new(GitHubProvider::new()))
    }

    pub fn with_source(config: Config, source: Box<dyn ReleaseSource>) -> Self {
        Compiler { config, source }
    }

    /// Fetches, filters and renders, returning the finished document.
    pub async fn compile(&self, format: OutputFormat) -> Result<String> {
        let repo = &self.config.repo;
        let records = self
            .source
            .fetch_releases(&repo.owner, &repo.name, &self.config.token)
            .await?;
        info!("Fetched {} releases for {}", records.len(), repo);
        let records = filter_releases(records);
        debug!("{} releases left after filtering", records.len());
        Ok(render(&records, format)?)
    }

    /// Overwrites `path` with the full document content.
    pub async fn write_output(&self, content: &str, path: &Path) -> Result<()> {
        tokio::fs::write(path, content).await?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use async_trait::async_trait;
    use relog_config::RepoId;
    use relog_provider::{FetchError, ReleaseRecord};

    struct StaticSource(Vec<ReleaseRecord>);

    #[async_trait]
    impl ReleaseSource for StaticSource {
        async fn fetch_releases(
            &self,
            _owner: &str,
            _repo: &str,
            _token: &str,
        ) -> relog_provider::error::Result<Vec<ReleaseRecord>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ReleaseSource for FailingSource {
        async fn fetch_releases(
            &self,
            _owner: &str,
            _repo: &str,
            _token: &str,
        ) -> relog_provider::error::Result<Vec<ReleaseRecord>> {
            Err(FetchError::rate_limit("quota exhausted"))
        }
    }

    fn config() -> Config {
        Config {
            repo: RepoId {
                owner: "relog-tools".to_string(),
                name: "relog".to_string(),
            },
            token: "test_token".to_string(),
        }
    }

    fn release(tag: &str, prerelease: bool) -> ReleaseRecord {
        ReleaseRecord {
            name: tag.to_string(),
            tag_name: tag.to_string(),
            published_at: "2024-03-03T10:00:00Z".to_string(),
            body: "* A".to_string(),
            prerelease,
        }
    }

    #[tokio::test]
    async fn test_compile_filters_before_rendering() {
        let compiler = Compiler::with_source(
            config(),
            Box::new(StaticSource(vec![
                release("v1.1", false),
                release("v1.0-experimental", false),
                release("v1.0-rc1", true),
            ])),
        );
        let doc = compiler.compile(OutputFormat::Markdown).await.unwrap();
        assert_eq!(doc.matches("## ").count(), 1);
        assert!(doc.contains("## v1.1 - 2024-03-03"));
    }

    #[tokio::test]
    async fn test_compile_propagates_fetch_errors() {
        let compiler = Compiler::with_source(config(), Box::new(FailingSource));
        let err = compiler.compile(OutputFormat::Markdown).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::RateLimit);
    }
}
