//! GitHub REST API commit source.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use super::{CommitInfo, CommitSource, FetchError, RepositoryInfo};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest page size the commits endpoint accepts.
const MAX_PAGE_SIZE: usize = 100;

/// Timeout for a single API request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct RepoResponse {
    full_name: String,
    description: Option<String>,
    html_url: String,
    default_branch: String,
    license: Option<LicenseResponse>,
}

#[derive(Deserialize)]
struct LicenseResponse {
    name: Option<String>,
}

#[derive(Deserialize)]
struct CommitResponse {
    sha: String,
    commit: CommitDetail,
    author: Option<AccountResponse>,
}

#[derive(Deserialize)]
struct CommitDetail {
    message: String,
    author: Option<SignatureResponse>,
}

#[derive(Deserialize)]
struct SignatureResponse {
    name: Option<String>,
    date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct AccountResponse {
    login: Option<String>,
}

impl From<CommitResponse> for CommitInfo {
    fn from(response: CommitResponse) -> Self {
        let signature = response.commit.author;
        let author = response
            .author
            .and_then(|account| account.login)
            .or_else(|| signature.as_ref().and_then(|s| s.name.clone()));
        let date = signature
            .and_then(|s| s.date)
            .unwrap_or_else(Utc::now);

        Self {
            hash: response.sha,
            author,
            date,
            message: response.commit.message.trim().to_string(),
        }
    }
}

/// Commit source backed by the GitHub REST API.
pub struct GitHubClient {
    /// HTTP client for API requests.
    client: Client,
    /// API root, e.g. `https://api.github.com/`.
    base_url: Url,
    owner: String,
    repo: String,
    /// Token for authenticated requests.
    token: Option<String>,
}

impl GitHubClient {
    /// Creates a client for `owner/repo` against the public API.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, token: Option<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_API_URL, owner, repo, token)
    }

    /// Creates a client against a specific API root, such as GitHub Enterprise.
    pub fn with_base_url(
        base_url: &str,
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).with_context(|| format!("Invalid API URL: {base_url}"))?;
        // Url::join replaces the last segment unless the path ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("repo-digest/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        let token = token.filter(|t| !t.trim().is_empty());
        debug!(base_url = %base_url, authenticated = token.is_some(), "GitHub client initialized");

        Ok(Self {
            client,
            base_url,
            owner: owner.into(),
            repo: repo.into(),
            token,
        })
    }

    fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    fn endpoint(&self, suffix: &str) -> Result<Url> {
        let path = format!("repos/{}/{}{suffix}", self.owner, self.repo);
        self.base_url
            .join(&path)
            .with_context(|| format!("Failed to build API URL for {path}"))
    }

    async fn get(&self, url: Url) -> Result<Response> {
        debug!(url = %url, "Sending GitHub API request");

        let mut builder = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let rate_limited = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim() == "0");
        let error_text = response.text().await.unwrap_or_else(|e| {
            debug!("Failed to read error response body: {e}");
            String::new()
        });

        let error = match status {
            StatusCode::NOT_FOUND => FetchError::RepositoryNotFound(self.full_name()),
            StatusCode::UNAUTHORIZED => FetchError::AccessDenied(self.full_name()),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS if rate_limited => {
                FetchError::RateLimitExceeded
            }
            StatusCode::FORBIDDEN => FetchError::AccessDenied(self.full_name()),
            _ => FetchError::ApiRequestFailed(format!("HTTP {status}: {error_text}")),
        };
        warn!(status = %status, repository = %self.full_name(), "GitHub API request failed");
        Err(error.into())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.get(url).await?;
        let value = response
            .json::<T>()
            .await
            .map_err(|e| FetchError::InvalidResponseFormat(e.to_string()))?;
        Ok(value)
    }

    async fn repository_info(&self) -> Result<RepositoryInfo> {
        let url = self.endpoint("")?;
        let repo: RepoResponse = self
            .get_json(url)
            .await
            .with_context(|| format!("Failed to fetch repository metadata for {}", self.full_name()))?;

        let info = RepositoryInfo {
            full_name: repo.full_name,
            description: repo.description.filter(|d| !d.trim().is_empty()),
            url: repo.html_url,
            license_name: repo.license.and_then(|l| l.name),
            default_branch: repo.default_branch,
        };
        info!(repository = %info.full_name, "Fetched repository metadata");
        Ok(info)
    }

    async fn commits(&self, max_commits: usize) -> Result<Vec<CommitInfo>> {
        info!(max_commits, repository = %self.full_name(), "Fetching commit history");

        let per_page = max_commits.clamp(1, MAX_PAGE_SIZE);
        let mut commits = Vec::new();
        let mut page = 1;

        while commits.len() < max_commits {
            let mut url = self.endpoint("/commits")?;
            url.query_pairs_mut()
                .append_pair("per_page", &per_page.to_string())
                .append_pair("page", &page.to_string());

            let items: Vec<serde_json::Value> = self
                .get_json(url)
                .await
                .with_context(|| format!("Failed to fetch commits for {}", self.full_name()))?;
            let page_len = items.len();

            for item in items {
                if commits.len() >= max_commits {
                    break;
                }
                match serde_json::from_value::<CommitResponse>(item) {
                    Ok(response) => commits.push(CommitInfo::from(response)),
                    Err(e) => debug!(error = %e, "Skipping commit that could not be decoded"),
                }
            }

            if page_len < per_page {
                break;
            }
            page += 1;
        }

        info!(count = commits.len(), repository = %self.full_name(), "Fetched commits");
        Ok(commits)
    }
}

impl CommitSource for GitHubClient {
    fn describe(&self) -> String {
        self.full_name()
    }

    fn fetch_repository_info(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<RepositoryInfo>> + Send + '_>> {
        Box::pin(self.repository_info())
    }

    fn fetch_commits(
        &self,
        max_commits: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<CommitInfo>>> + Send + '_>> {
        Box::pin(self.commits(max_commits))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn commit_json(sha: &str, message: &str, login: Option<&str>) -> serde_json::Value {
        json!({
            "sha": sha,
            "commit": {
                "message": message,
                "author": { "name": "Commit Author", "date": "2024-03-01T12:00:00Z" }
            },
            "author": login.map(|l| json!({ "login": l })),
        })
    }

    fn client(server: &MockServer, token: Option<&str>) -> GitHubClient {
        GitHubClient::with_base_url(&server.uri(), "octo", "demo", token.map(str::to_string))
            .unwrap()
    }

    #[test]
    fn endpoint_preserves_base_path() {
        let client =
            GitHubClient::with_base_url("https://ghe.example.com/api/v3", "o", "r", None).unwrap();
        assert_eq!(
            client.endpoint("/commits").unwrap().as_str(),
            "https://ghe.example.com/api/v3/repos/o/r/commits"
        );
    }

    #[test]
    fn blank_token_is_ignored() {
        let client = GitHubClient::new("o", "r", Some("  ".to_string())).unwrap();
        assert!(client.token.is_none());
    }

    #[tokio::test]
    async fn fetches_repository_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/demo"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "full_name": "octo/demo",
                "description": "Demo project",
                "html_url": "https://github.com/octo/demo",
                "default_branch": "main",
                "license": { "key": "mit", "name": "MIT License" }
            })))
            .mount(&server)
            .await;

        let info = client(&server, Some("secret"))
            .fetch_repository_info()
            .await
            .unwrap();
        assert_eq!(info.full_name, "octo/demo");
        assert_eq!(info.description.as_deref(), Some("Demo project"));
        assert_eq!(info.license_name.as_deref(), Some("MIT License"));
        assert_eq!(info.default_branch, "main");
    }

    #[tokio::test]
    async fn missing_repository_is_distinguishable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/demo"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
            .mount(&server)
            .await;

        let err = client(&server, None).fetch_repository_info().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::RepositoryNotFound(name)) if name == "octo/demo"
        ));
    }

    #[tokio::test]
    async fn exhausted_rate_limit_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/demo/commits"))
            .respond_with(
                ResponseTemplate::new(403).insert_header("x-ratelimit-remaining", "0"),
            )
            .mount(&server)
            .await;

        let err = client(&server, None).fetch_commits(10).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::RateLimitExceeded)
        ));
    }

    #[tokio::test]
    async fn commits_are_decoded_and_undecodable_ones_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/demo/commits"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                commit_json("aaa111", "feat: add login\n", Some("octocat")),
                { "sha": "broken" },
                commit_json("bbb222", "fix: crash", None),
            ])))
            .mount(&server)
            .await;

        let commits = client(&server, None).fetch_commits(10).await.unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].hash, "aaa111");
        assert_eq!(commits[0].author.as_deref(), Some("octocat"));
        assert_eq!(commits[0].message, "feat: add login");
        assert_eq!(commits[0].date.to_rfc3339(), "2024-03-01T12:00:00+00:00");
        assert_eq!(commits[1].author.as_deref(), Some("Commit Author"));
    }

    fn page(start: usize, len: usize) -> Vec<serde_json::Value> {
        (start..start + len)
            .map(|i| commit_json(&format!("sha{i}"), &format!("chore: step {i}"), None))
            .collect()
    }

    async fn mount_page(
        server: &MockServer,
        per_page: &str,
        number: &str,
        body: Vec<serde_json::Value>,
        calls: u64,
    ) {
        Mock::given(method("GET"))
            .and(path("/repos/octo/demo/commits"))
            .and(query_param("per_page", per_page))
            .and(query_param("page", number))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(calls)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn stops_within_first_page_at_limit() {
        let server = MockServer::start().await;
        mount_page(&server, "2", "1", page(0, 2), 1).await;
        mount_page(&server, "2", "2", page(2, 2), 0).await;

        let commits = client(&server, None).fetch_commits(2).await.unwrap();
        assert_eq!(
            commits.iter().map(|c| c.hash.as_str()).collect::<Vec<_>>(),
            vec!["sha0", "sha1"]
        );
    }

    #[tokio::test]
    async fn follows_pages_until_a_short_page() {
        let server = MockServer::start().await;
        mount_page(&server, "100", "1", page(0, 100), 1).await;
        mount_page(&server, "100", "2", page(100, 30), 1).await;
        mount_page(&server, "100", "3", page(130, 100), 0).await;

        let commits = client(&server, None).fetch_commits(150).await.unwrap();
        assert_eq!(commits.len(), 130);
        assert_eq!(commits[0].hash, "sha0");
        assert_eq!(commits[100].hash, "sha100");
        assert_eq!(commits[129].hash, "sha129");
    }

    #[tokio::test]
    async fn truncates_later_page_at_limit() {
        let server = MockServer::start().await;
        mount_page(&server, "100", "1", page(0, 100), 1).await;
        mount_page(&server, "100", "2", page(100, 100), 1).await;

        let commits = client(&server, None).fetch_commits(120).await.unwrap();
        assert_eq!(commits.len(), 120);
        assert_eq!(commits[119].hash, "sha119");
    }

    #[tokio::test]
    async fn empty_history_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/demo/commits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let commits = client(&server, None).fetch_commits(50).await.unwrap();
        assert!(commits.is_empty());
    }
}
