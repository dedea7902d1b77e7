//! GitHub API client using octocrab

use crate::{Error, Result};
use octocrab::Octocrab;
use tracing::info;
use transync_core::{RepoSlug, Token};

/// GitHub API client bound to one repository
pub struct GitHubClient {
    client: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Create a new GitHub client for the specified repository
    ///
    /// The token is passed in explicitly; nothing is read from the environment.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, token: &Token) -> Result<Self> {
        let owner = owner.into();
        let repo = repo.into();

        if token.is_empty() {
            return Err(Error::Auth("GitHub token is empty".to_string()));
        }

        let client = Octocrab::builder()
            .personal_token(token.expose().to_string())
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        info!(owner = %owner, repo = %repo, "Created GitHub client");

        Ok(Self {
            client,
            owner,
            repo,
        })
    }

    /// Create a GitHub client for a parsed repository slug
    pub fn for_repo(slug: &RepoSlug, token: &Token) -> Result<Self> {
        Self::new(&slug.owner, &slug.name, token)
    }

    /// Get the repository owner
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }

    /// Classify an API failure for this repository
    pub(crate) fn classify(&self, err: octocrab::Error) -> Error {
        let kind = match &err {
            octocrab::Error::GitHub { source, .. } => classify_message(&source.message),
            _ => FailureKind::Other,
        };
        match kind {
            FailureKind::NotFound => Error::RepoNotFound(format!("{}/{}", self.owner, self.repo)),
            FailureKind::BadCredentials => Error::Auth("Invalid GitHub token".to_string()),
            FailureKind::Other => Error::Api(err),
        }
    }
}

/// Kinds of GitHub API failure worth telling apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureKind {
    NotFound,
    BadCredentials,
    Other,
}

/// Classify a GitHub error response by its message
pub(crate) fn classify_message(message: &str) -> FailureKind {
    if message.contains("Not Found") {
        FailureKind::NotFound
    } else if message.contains("Bad credentials") {
        FailureKind::BadCredentials
    } else {
        FailureKind::Other
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}
