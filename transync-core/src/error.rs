//! Error types for transync

use thiserror::Error;

/// Result type alias for transync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for transync operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required environment variable is not set
    #[error("Missing required environment variable: {0}")]
    MissingConfiguration(String),

    /// Configuration is present but unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// An external command could not be started
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// An external command exited unsuccessfully (strict mode only)
    #[error("Command `{command}` exited with code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// Listing branches on the remote failed
    #[error("Failed to list remote branches: {0}")]
    RemoteListing(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The protected branch is absent from the remote listing
    #[error("Protected branch '{0}' not found in remote branch listing")]
    ProtectedBranchMissing(String),

    /// One or more remote branch deletions failed (strict mode only)
    #[error("Failed to delete {} remote branch(es): {}", .0.len(), .0.join(", "))]
    DeletionFailed(Vec<String>),
}
