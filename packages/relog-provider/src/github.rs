use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::collections::HashMap;

use crate::data::ReleaseRecord;
use crate::error::{FetchError, Result};

use relog_utils::http::{get, http_status_is_ok};

pub const GITHUB_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "relog";
const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// A remote source of release records.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn fetch_releases(
        &self,
        owner: &str,
        repo: &str,
        token: &str,
    ) -> Result<Vec<ReleaseRecord>>;
}

pub struct GitHubProvider {
    api_url: String,
}

impl Default for GitHubProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubProvider {
    pub fn new() -> Self {
        Self::with_api_url(GITHUB_API_URL)
    }

    /// Point the provider at a different API base, used by tests.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        GitHubProvider {
            api_url: api_url.into(),
        }
    }

    fn releases_url(&self, owner: &str, repo: &str) -> String {
        // Single request, pagination links are not followed.
        format!(
            "{}/repos/{}/{}/releases?per_page=100",
            self.api_url, owner, repo
        )
    }
}

#[async_trait]
impl ReleaseSource for GitHubProvider {
    async fn fetch_releases(
        &self,
        owner: &str,
        repo: &str,
        token: &str,
    ) -> Result<Vec<ReleaseRecord>> {
        let url = self.releases_url(owner, repo);
        debug!("Requesting {}", url);
        let parsed_url = url
            .parse()
            .map_err(|e| FetchError::network(format!("Invalid URL {}: {}", url, e)))?;

        let header_map = HashMap::from([
            ("User-Agent".to_string(), USER_AGENT.to_string()),
            ("Authorization".to_string(), format!("Bearer {}", token)),
        ]);
        let rsp = get(parsed_url, &header_map)
            .await
            .map_err(|e| FetchError::network(e.to_string()))?;

        if !http_status_is_ok(rsp.status) {
            if rsp.status == 403 && rsp.header(RATE_LIMIT_REMAINING_HEADER) == Some("0") {
                return Err(FetchError::rate_limit(format!(
                    "API rate limit exhausted for {}/{}",
                    owner, repo
                )));
            }
            return Err(FetchError::http(rsp.status, &url));
        }

        let body = rsp
            .body
            .ok_or_else(|| FetchError::parse("Empty response body"))?;
        let data = serde_json::from_slice::<Vec<Value>>(&body)
            .map_err(|e| FetchError::parse(format!("Malformed releases payload: {}", e)))?;

        let releases = data.iter().filter_map(parse_release).collect::<Vec<_>>();
        debug!("Parsed {} releases from {}", releases.len(), url);
        Ok(releases)
    }
}

fn parse_release(json: &Value) -> Option<ReleaseRecord> {
    let tag_name = json.get("tag_name")?.as_str()?.to_string();
    let name = json
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or(&tag_name)
        .to_string();
    let published_at = json
        .get("published_at")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let body = json
        .get("body")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let prerelease = json
        .get("prerelease")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    Some(ReleaseRecord {
        name,
        tag_name,
        published_at,
        body,
        prerelease,
    })
}
