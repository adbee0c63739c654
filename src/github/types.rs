use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Account that owns a repository or authored a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// Repository record as returned by `GET /repos/{owner}/{repo}`.
/// Only the fields the stats snapshot needs are deserialized.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoData {
    pub name: String,
    pub owner: Owner,
    pub stargazers_count: u64,
    /// GitHub counts open pull requests here too
    pub open_issues_count: u64,
    pub forks_count: u64,
    pub updated_at: DateTime<Utc>,
}

/// Pull request record as returned by `GET /repos/{owner}/{repo}/pulls`.
/// Only the number of records feeds the snapshot today.
#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
pub struct PullRequestData {
    pub number: u64,
    pub title: String,
    pub user: Owner,
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_repo_data() {
        let json = r#"{
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "owner": { "login": "octocat", "id": 1 },
            "stargazers_count": 80,
            "open_issues_count": 3,
            "forks_count": 9,
            "updated_at": "2011-01-26T19:14:43Z"
        }"#;
        let data: RepoData = serde_json::from_str(json).unwrap();
        assert_eq!(data.name, "Hello-World");
        assert_eq!(data.owner.login, "octocat");
        assert_eq!(data.stargazers_count, 80);
        assert_eq!(data.open_issues_count, 3);
        assert_eq!(data.forks_count, 9);
        assert_eq!(data.updated_at.to_rfc3339(), "2011-01-26T19:14:43+00:00");
    }

    #[test]
    fn test_deserialize_pull_requests() {
        let json = r#"[
            { "number": 1347, "title": "Amazing new feature", "user": { "login": "octocat" }, "state": "open" },
            { "number": 1348, "title": "Fix typo", "user": { "login": "hubot" }, "state": "open" }
        ]"#;
        let prs: Vec<PullRequestData> = serde_json::from_str(json).unwrap();
        assert_eq!(prs.len(), 2);
        assert_eq!(prs[1].user.login, "hubot");
    }
}
