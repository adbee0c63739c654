pub mod delta;
pub mod types;

pub use delta::calculate_event_summary;
pub use types::{EventSummary, RepoState, RepoStats};

use crate::github::GitHubApi;

/// Fetches repository snapshots through an injected GitHub client.
///
/// Client errors are returned as-is: no wrapping, no retry, and no partial
/// snapshot when one of the calls fails.
#[derive(Debug)]
pub struct StatsService<C> {
    client: C,
}

impl<C: GitHubApi> StatsService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetch repository metadata, then open pull requests, and assemble a snapshot.
    /// Pull requests are not requested when the metadata call fails.
    pub async fn get_repo_stats(&self, owner: &str, repo: &str) -> Result<RepoStats, C::Error> {
        let data = self.client.get_repo_data(owner, repo).await?;
        let pulls = self.client.get_pull_requests(owner, repo).await?;

        Ok(RepoStats {
            name: data.name,
            owner: data.owner.login,
            stars: data.stargazers_count,
            issues: data.open_issues_count,
            pull_requests: pulls.len() as u64,
            forks: data.forks_count,
            updated_at: data.updated_at,
        })
    }

    pub async fn repo_exists(&self, owner: &str, repo: &str) -> Result<bool, C::Error> {
        self.client.check_repo_exists(owner, repo).await
    }
}
