pub mod client;
pub mod types;

pub use client::HttpGitHubClient;
pub use types::{PullRequestData, RepoData};
#[cfg(test)]
pub use types::Owner;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),

    #[error("GitHub API returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Invalid GitHub API base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Capability the stats fetcher needs from a GitHub API client.
///
/// Implementations own transport concerns (auth, timeouts, retries).
/// Their errors are handed back to callers unchanged.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the repository record.
    async fn get_repo_data(&self, owner: &str, repo: &str) -> Result<RepoData, Self::Error>;

    /// Fetch every open pull request of the repository.
    async fn get_pull_requests(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<PullRequestData>, Self::Error>;

    /// Cheap existence probe; `Ok(false)` when the repository is not found.
    async fn check_repo_exists(&self, owner: &str, repo: &str) -> Result<bool, Self::Error>;
}
