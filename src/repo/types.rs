use thiserror::Error;

/// Canonical repository identifier extracted by `parse_repo_string()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    /// Lowercased `owner/repo`. GitHub resolves names case-insensitively,
    /// so differently cased spellings share one baseline.
    pub fn state_key(&self) -> String {
        self.to_string().to_lowercase()
    }
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// What went wrong while parsing a repository reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Input looked like a link but could not be parsed as a URL
    InvalidUrl,
    /// Input did not reduce to exactly `owner/repo`
    InvalidFormat,
}

/// A repository reference that could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// The raw input as the user supplied it
    pub input: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, input: &str, message: String) -> Self {
        Self {
            kind,
            input: input.to_string(),
            message,
        }
    }
}
