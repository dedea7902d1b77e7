//! Repository identifiers

use std::fmt;

use crate::{Error, Result};

/// Host the translations repositories live on
pub const GITHUB_HOST: &str = "github.com";

/// A repository identified by owner and name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    /// Repository owner/organization
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoSlug {
    /// Parse a repository identifier
    ///
    /// Supports:
    /// - `owner/repo`
    /// - `https://github.com/owner/repo` (with or without `.git`)
    /// - `git@github.com:owner/repo.git`
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.starts_with("https://") || input.starts_with("http://") {
            let url = url::Url::parse(input)
                .map_err(|e| Error::Config(format!("Invalid repository URL {}: {}", input, e)))?;
            return Self::from_path(url.path().trim_start_matches('/'), input);
        }

        if let Some(rest) = input.strip_prefix("git@") {
            if let Some((_, path)) = rest.split_once(':') {
                return Self::from_path(path, input);
            }
        }

        Self::from_path(input, input)
    }

    fn from_path(path: &str, input: &str) -> Result<Self> {
        let path = path.trim_end_matches('/').trim_end_matches(".git");
        let parts: Vec<&str> = path.split('/').collect();

        match parts.as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(Error::Config(format!(
                "Invalid repository identifier: '{}'. Expected owner/name",
                input
            ))),
        }
    }

    /// `owner/name` form used by the API and the clone URL
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Directory `git clone` creates for this repository
    pub fn clone_dir_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
