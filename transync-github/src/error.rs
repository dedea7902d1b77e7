//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// GitHub API error
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// Repository missing or not visible to the token
    #[error("Repository {0} not found or not accessible")]
    RepoNotFound(String),
}

impl From<Error> for transync_core::Error {
    fn from(err: Error) -> Self {
        transync_core::Error::RemoteListing(Box::new(err))
    }
}
