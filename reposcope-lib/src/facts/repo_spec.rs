use crate::Result;
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use ohno::{IntoAppError, bail};
use std::sync::Arc;
use url::Url;

/// Identity of a repository on the hosting service: `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    owner: Arc<str>,
    repo: Arc<str>,
}

impl RepoSpec {
    /// Parse either `owner/name` or a repository URL such as `https://github.com/owner/name.git`.
    ///
    /// Extra URL path segments (`/tree/main/...`) are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();

        if text.contains("://") {
            let url = Url::parse(text).into_app_err_with(|| format!("parsing repository URL '{text}'"))?;
            return Self::from_url(&url);
        }

        let mut parts = text.split('/');
        let (Some(owner), Some(repo), None) = (parts.next(), parts.next(), parts.next()) else {
            bail!("invalid repository '{text}': expected OWNER/NAME or a repository URL");
        };

        Self::from_parts(owner, repo, text)
    }

    fn from_url(url: &Url) -> Result<Self> {
        let path_segments: Vec<_> = url.path_segments().map(Iterator::collect).unwrap_or_default();

        let [owner, repo, ..] = path_segments.as_slice() else {
            bail!("invalid repository URL format: {url}");
        };

        Self::from_parts(owner, repo, url.as_str())
    }

    fn from_parts(owner: &str, repo: &str, original: &str) -> Result<Self> {
        let repo = repo.trim_end_matches(".git");
        if owner.is_empty() || repo.is_empty() {
            bail!("invalid repository '{original}': empty owner or repository name");
        }

        Ok(Self {
            owner: Arc::from(owner),
            repo: Arc::from(repo),
        })
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl FromStr for RepoSpec {
    type Err = ohno::AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_name() {
        let spec = RepoSpec::parse("tokio-rs/tokio").unwrap();
        assert_eq!(spec.owner(), "tokio-rs");
        assert_eq!(spec.repo(), "tokio");
        assert_eq!(spec.to_string(), "tokio-rs/tokio");
    }

    #[test]
    fn test_parse_github_url() {
        let spec = RepoSpec::parse("https://github.com/tokio-rs/tokio").unwrap();
        assert_eq!(spec.owner(), "tokio-rs");
        assert_eq!(spec.repo(), "tokio");
    }

    #[test]
    fn test_parse_url_with_git_extension() {
        let spec = RepoSpec::parse("https://github.com/serde-rs/serde.git").unwrap();
        assert_eq!(spec.repo(), "serde");
    }

    #[test]
    fn test_parse_url_with_additional_path_segments() {
        let spec = RepoSpec::parse("https://github.com/tokio-rs/tokio/tree/master/tokio-util").unwrap();
        assert_eq!(spec.owner(), "tokio-rs");
        assert_eq!(spec.repo(), "tokio");
    }

    #[test]
    fn test_same_repo_different_forms_are_equal() {
        let a = RepoSpec::parse("serde-rs/serde").unwrap();
        let b = RepoSpec::parse("https://github.com/serde-rs/serde.git/tree/master").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let spec = RepoSpec::parse("  octo/cat \n").unwrap();
        assert_eq!(spec.to_string(), "octo/cat");
    }

    #[test]
    fn test_parse_invalid_inputs() {
        let _ = RepoSpec::parse("just-a-name").unwrap_err();
        let _ = RepoSpec::parse("a/b/c").unwrap_err();
        let _ = RepoSpec::parse("/name").unwrap_err();
        let _ = RepoSpec::parse("owner/").unwrap_err();
        let _ = RepoSpec::parse("https://github.com/").unwrap_err();
        let _ = RepoSpec::parse("https://github.com/tokio-rs").unwrap_err();
    }

    #[test]
    fn test_from_str() {
        let spec: RepoSpec = "octo/cat".parse().unwrap();
        assert_eq!(spec.owner(), "octo");
    }
}
