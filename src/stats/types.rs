use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of a repository's counters.
/// Note: constructed fresh by `StatsService::get_repo_stats()` on every fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoStats {
    pub name: String,
    /// Owner login
    pub owner: String,
    pub stars: u64,
    /// Open issues as reported by GitHub
    pub issues: u64,
    /// Open pull requests
    pub pull_requests: u64,
    pub forks: u64,
    pub updated_at: DateTime<Utc>,
}

/// Counters observed on the previous poll, used as the comparison baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoState {
    pub last_star_count: u64,
    pub last_issue_count: u64,
    pub last_pr_count: u64,
    pub last_fork_count: u64,
}

impl From<&RepoStats> for RepoState {
    fn from(stats: &RepoStats) -> Self {
        Self {
            last_star_count: stats.stars,
            last_issue_count: stats.issues,
            last_pr_count: stats.pull_requests,
            last_fork_count: stats.forks,
        }
    }
}

/// Positive-only differences between a snapshot and the previous state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    /// Repository identifier as given by the caller
    pub repo: String,
    pub new_stars: u64,
    pub new_issues: u64,
    pub new_prs: u64,
    pub new_forks: u64,
    /// True when at least one counter increased
    pub has_changes: bool,
}
