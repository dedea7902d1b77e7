//! Transync GitHub - GitHub integration for transync
//!
//! This crate lists the branches of the translations repository through the
//! GitHub API and plugs into the core cleanup as a `BranchSource`.

mod branches;
mod client;
mod error;

pub use client::GitHubClient;
pub use error::{Error, Result};
