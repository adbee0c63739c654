pub mod types;

pub use types::{RepoId, ValidationError, ValidationErrorKind};

use percent_encoding::percent_decode_str;

/// Normalize a user-supplied repository reference into its owner and name.
///
/// Accepts plain `owner/repo` as well as `http(s)://` links, tolerating
/// surrounding whitespace, extra slashes and a trailing `.git`.
pub fn parse_repo_string(input: &str) -> Result<RepoId, ValidationError> {
    let mut trimmed = input
        .trim_matches(|c: char| c == '/' || c.is_whitespace())
        .to_string();

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        let invalid_url = |reason: String| {
            ValidationError::new(
                ValidationErrorKind::InvalidUrl,
                input,
                format!("invalid repo link: {} ({})", input, reason),
            )
        };
        reqwest::Url::parse(&trimmed).map_err(|err| invalid_url(err.to_string()))?;
        trimmed = percent_decode_str(raw_link_path(&trimmed))
            .decode_utf8()
            .map_err(|err| invalid_url(err.to_string()))?
            .into_owned();
    }

    let trimmed = trimmed.trim_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    let segments: Vec<&str> = trimmed.split('/').collect();
    match segments.as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok(RepoId {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }),
        _ => Err(ValidationError::new(
            ValidationErrorKind::InvalidFormat,
            input,
            format!("invalid repo format: {} (expected owner/repo or link)", input),
        )),
    }
}

/// Path of a link exactly as written: no dot-segment resolution and no
/// re-encoding, which `Url::path()` would apply.
fn raw_link_path(link: &str) -> &str {
    let after_scheme = link.split_once("://").map_or(link, |(_, rest)| rest);
    let without_suffix = after_scheme
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default();
    without_suffix
        .find('/')
        .map_or("", |start| &without_suffix[start..])
}
