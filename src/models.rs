use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::SetupError;

/// Only repository URLs with this prefix are accepted
pub const GITHUB_URL_PREFIX: &str = "https://github.com/";

/// Number of forks processed when no count is given on the command line
pub const DEFAULT_FORK_COUNT: usize = 30;

/// Owner and name of a GitHub repository, derived once from the CLI URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryReference {
    pub owner: String,
    pub name: String,
}

impl RepositoryReference {
    /// Parse `https://github.com/<owner>/<repo>[.git]`.
    ///
    /// The owner and name are the last two `/`-separated segments; exactly one
    /// trailing `.git` is removed from the name.
    pub fn parse(url: &str) -> Result<Self, SetupError> {
        if !url.starts_with(GITHUB_URL_PREFIX) {
            return Err(SetupError::Validation(format!(
                "Invalid GitHub URL: {url}\nURL must start with '{GITHUB_URL_PREFIX}'"
            )));
        }

        // ["https:", "", "github.com", "owner", "repo"]
        let parts: Vec<&str> = url.split('/').collect();
        if parts.len() < 5 {
            return Err(invalid_format(url));
        }

        let owner = parts[parts.len() - 2];
        let last = parts[parts.len() - 1];
        let name = last.strip_suffix(".git").unwrap_or(last);

        if owner.is_empty() || name.is_empty() {
            return Err(invalid_format(url));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// `<base>/<owner>/<name>.git`
    #[must_use]
    pub fn clone_url(&self, base: &str) -> String {
        format!("{}/{}/{}.git", base.trim_end_matches('/'), self.owner, self.name)
    }

    /// The same repository name under a different owner (the user's fork)
    #[must_use]
    pub fn with_owner(&self, owner: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: self.name.clone(),
        }
    }
}

fn invalid_format(url: &str) -> SetupError {
    SetupError::Validation(format!(
        "Invalid GitHub URL format: {url}\nExpected format: https://github.com/owner/repo"
    ))
}

impl FromStr for RepositoryReference {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A named remote as reported by git
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub url: String,
}

/// One element of the forks listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkDescriptor {
    pub owner_login: String,
    pub clone_url: String,
}

/// Subset of `GET /repos/{owner}/{repo}` this tool reads
#[derive(Debug, Clone, Deserialize)]
pub struct RepoMetadata {
    pub forks_count: u64,
}

/// How many forks to process, as requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkLimit {
    /// Stop after this many forks have been processed (always >= 1)
    Limited(usize),
    /// Page through every fork
    All,
}

impl Default for ForkLimit {
    fn default() -> Self {
        Self::Limited(DEFAULT_FORK_COUNT)
    }
}

impl FromStr for ForkLimit {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        match value.parse::<i64>() {
            Ok(n) if n >= 1 => usize::try_from(n)
                .map(Self::Limited)
                .map_err(|_| invalid_fork_count(s)),
            _ => Err(invalid_fork_count(s)),
        }
    }
}

fn invalid_fork_count(value: &str) -> SetupError {
    SetupError::Validation(format!(
        "Invalid number of forks: {value}\nMust be a positive number or 'all'"
    ))
}

impl fmt::Display for ForkLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{n}"),
            Self::All => write!(f, "all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_url() {
        let reference = RepositoryReference::parse("https://github.com/octocat/Hello-World").unwrap();
        assert_eq!(reference.owner, "octocat");
        assert_eq!(reference.name, "Hello-World");
    }

    #[test]
    fn test_parse_strips_one_trailing_git() {
        let reference =
            RepositoryReference::parse("https://github.com/octocat/Hello-World.git").unwrap();
        assert_eq!(reference.name, "Hello-World");

        let doubled = RepositoryReference::parse("https://github.com/octocat/dotgit.git.git").unwrap();
        assert_eq!(doubled.name, "dotgit.git");

        // Only a suffix is stripped
        let inner = RepositoryReference::parse("https://github.com/octocat/my.github.io").unwrap();
        assert_eq!(inner.name, "my.github.io");
    }

    #[test]
    fn test_parse_uses_last_two_segments() {
        let reference =
            RepositoryReference::parse("https://github.com/org/team/project").unwrap();
        assert_eq!(reference.owner, "team");
        assert_eq!(reference.name, "project");
    }

    #[test]
    fn test_parse_rejects_wrong_prefix() {
        for url in [
            "not_a_url",
            "http://github.com/octocat/Hello-World",
            "https://gitlab.com/octocat/Hello-World",
            "git@github.com:octocat/Hello-World.git",
            "github.com/octocat/Hello-World",
        ] {
            let err = RepositoryReference::parse(url).unwrap_err();
            assert!(matches!(err, SetupError::Validation(_)), "{url}");
            assert!(err.to_string().contains("URL must start with 'https://github.com/'"));
        }
    }

    #[test]
    fn test_parse_rejects_missing_segments() {
        for url in [
            "https://github.com/",
            "https://github.com/octocat",
            "https://github.com/octocat/",
            "https://github.com/octocat/.git",
        ] {
            let err = RepositoryReference::parse(url).unwrap_err();
            assert!(
                err.to_string().contains("Expected format: https://github.com/owner/repo"),
                "{url}: {err}"
            );
        }
    }

    #[test]
    fn test_clone_url_building() {
        let reference = RepositoryReference::parse("https://github.com/octocat/Hello-World").unwrap();
        assert_eq!(
            reference.clone_url("https://github.com"),
            "https://github.com/octocat/Hello-World.git"
        );
        assert_eq!(
            reference.with_owner("endolith").clone_url("https://github.com/"),
            "https://github.com/endolith/Hello-World.git"
        );
    }

    #[test]
    fn test_fork_limit_parsing() {
        assert_eq!("5".parse::<ForkLimit>().unwrap(), ForkLimit::Limited(5));
        assert_eq!("all".parse::<ForkLimit>().unwrap(), ForkLimit::All);
        assert_eq!("ALL".parse::<ForkLimit>().unwrap(), ForkLimit::All);
        assert_eq!("All".parse::<ForkLimit>().unwrap(), ForkLimit::All);
        assert_eq!(ForkLimit::default(), ForkLimit::Limited(30));
    }

    #[test]
    fn test_fork_limit_surrounding_whitespace_is_ignored_for_both_forms() {
        assert_eq!(" 5 ".parse::<ForkLimit>().unwrap(), ForkLimit::Limited(5));
        assert_eq!(" all ".parse::<ForkLimit>().unwrap(), ForkLimit::All);
        assert_eq!("\tALL\n".parse::<ForkLimit>().unwrap(), ForkLimit::All);
    }

    #[test]
    fn test_fork_limit_rejects_non_positive_and_garbage() {
        for value in ["0", "-1", "invalid", "", "2.5", "allx"] {
            let err = value.parse::<ForkLimit>().unwrap_err();
            assert!(matches!(err, SetupError::Validation(_)), "{value}");
            assert!(err.to_string().contains("Must be a positive number or 'all'"));
        }
    }
}
