use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument};

use super::types::{PullRequestData, RepoData};
use super::{GitHubApi, GitHubError};
use crate::config::Config;

const USER_AGENT: &str = "repo-watch";
const PER_PAGE: usize = 100;

/// `GitHubApi` backed by the GitHub REST API over reqwest.
#[derive(Debug, Clone)]
pub struct HttpGitHubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGitHubClient {
    /// Build a client from configuration. Requests are anonymous when no
    /// token is configured, which works for public repositories.
    pub fn new(config: &Config) -> Result<Self, GitHubError> {
        let base_url = config.github.api_url().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|err| GitHubError::InvalidBaseUrl(format!("{}: {}", base_url, err)))?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.github.timeout_secs()))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: config.github_token(),
        })
    }

    fn repo_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{}/{}", self.base_url, owner, repo)
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github+json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_checked(&self, request: RequestBuilder, url: &str) -> Result<Response, GitHubError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GitHubError::Status {
                status,
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl GitHubApi for HttpGitHubClient {
    type Error = GitHubError;

    #[instrument(skip(self))]
    async fn get_repo_data(&self, owner: &str, repo: &str) -> Result<RepoData, GitHubError> {
        let url = self.repo_url(owner, repo);
        debug!("fetching repository metadata from GitHub API");
        let data = self
            .send_checked(self.get(&url), &url)
            .await?
            .json::<RepoData>()
            .await?;
        debug!(stars = data.stargazers_count, issues = data.open_issues_count, forks = data.forks_count, "received repository metadata");
        Ok(data)
    }

    #[instrument(skip(self))]
    async fn get_pull_requests(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<PullRequestData>, GitHubError> {
        let url = format!("{}/pulls", self.repo_url(owner, repo));
        let mut pulls = Vec::new();
        let mut page = 1;

        loop {
            let request = self.get(&url).query(&[
                ("state", "open".to_string()),
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]);
            let batch = self
                .send_checked(request, &url)
                .await?
                .json::<Vec<PullRequestData>>()
                .await?;
            debug!(page, count = batch.len(), "received pull request page");

            let last_page = batch.len() < PER_PAGE;
            pulls.extend(batch);
            if last_page {
                break;
            }
            page += 1;
        }

        Ok(pulls)
    }

    #[instrument(skip(self))]
    async fn check_repo_exists(&self, owner: &str, repo: &str) -> Result<bool, GitHubError> {
        let url = self.repo_url(owner, repo);
        let status = self.get(&url).send().await?.status();
        debug!(%status, "repository existence probe");
        match status {
            StatusCode::NOT_FOUND => Ok(false),
            s if s.is_success() => Ok(true),
            status => Err(GitHubError::Status { status, url }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GitHubConfig;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_with(api_url: Option<&str>) -> Config {
        Config {
            github: GitHubConfig {
                token: Some("test-token".to_string()),
                api_url: api_url.map(str::to_string),
                timeout_secs: None,
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_default_base_url() {
        let client = HttpGitHubClient::new(&config_with(None)).unwrap();
        assert_eq!(client.repo_url("org", "repo"), "https://api.github.com/repos/org/repo");
    }

    #[test]
    fn test_custom_base_url_trailing_slash() {
        let client =
            HttpGitHubClient::new(&config_with(Some("https://ghe.example.com/api/v3/"))).unwrap();
        assert_eq!(
            client.repo_url("org", "repo"),
            "https://ghe.example.com/api/v3/repos/org/repo"
        );
        assert_eq!(client.token.as_deref(), Some("test-token"));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpGitHubClient::new(&config_with(Some("not a url"))).unwrap_err();
        assert!(matches!(err, GitHubError::InvalidBaseUrl(_)));
    }

    fn pull_page(start: u64, count: u64) -> serde_json::Value {
        let pulls: Vec<_> = (start..start + count)
            .map(|number| {
                json!({
                    "number": number,
                    "title": format!("PR {}", number),
                    "user": { "login": "contributor" },
                    "state": "open"
                })
            })
            .collect();
        json!(pulls)
    }

    fn mock_client(server: &MockServer) -> HttpGitHubClient {
        HttpGitHubClient::new(&config_with(Some(&server.uri()))).unwrap()
    }

    #[tokio::test]
    async fn test_pull_requests_follow_pages_until_short_page() {
        let server = MockServer::start().await;
        for (page, body) in [("1", pull_page(1, 100)), ("2", pull_page(101, 100)), ("3", pull_page(0, 0))] {
            Mock::given(method("GET"))
                .and(path("/repos/org/repo/pulls"))
                .and(query_param("state", "open"))
                .and(query_param("per_page", "100"))
                .and(query_param("page", page))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = mock_client(&server);
        let pulls = client.get_pull_requests("org", "repo").await.unwrap();
        assert_eq!(pulls.len(), 200);
        assert_eq!(pulls[199].number, 200);
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_requests_carry_auth_and_accept_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/org/repo"))
            .and(header("authorization", "Bearer test-token"))
            .and(header("accept", "application/vnd.github+json"))
            .and(header("user-agent", "repo-watch"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "repo",
                "owner": { "login": "org" },
                "stargazers_count": 12,
                "open_issues_count": 2,
                "forks_count": 1,
                "updated_at": "2024-05-01T12:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let data = client.get_repo_data("org", "repo").await.unwrap();
        assert_eq!(data.owner.login, "org");
        assert_eq!(data.stargazers_count, 12);
    }

    #[tokio::test]
    async fn test_repo_data_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/org/repo"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let err = client.get_repo_data("org", "repo").await.unwrap_err();
        match err {
            GitHubError::Status { status, url } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert!(url.ends_with("/repos/org/repo"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_check_repo_exists_statuses() {
        let server = MockServer::start().await;
        for (repo, status) in [("present", 200), ("gone", 404), ("broken", 500)] {
            Mock::given(method("GET"))
                .and(path(format!("/repos/org/{}", repo)))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;
        }

        let client = mock_client(&server);
        assert!(client.check_repo_exists("org", "present").await.unwrap());
        assert!(!client.check_repo_exists("org", "gone").await.unwrap());
        let err = client.check_repo_exists("org", "broken").await.unwrap_err();
        assert!(matches!(
            err,
            GitHubError::Status { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR
        ));
    }
}
