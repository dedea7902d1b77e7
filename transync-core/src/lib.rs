//! Transync Core - Core library for syncing translation repositories
//!
//! This crate checks out a translations repository with the bot's commit
//! identity and prunes the branches sync tooling leaves behind.

pub mod command;
pub mod config;
pub mod error;
pub mod git;
pub mod secrets;
pub mod sync;

#[cfg(test)]
mod testing;

pub use command::{CommandOutput, CommandRunner, ProcessRunner, Strictness};
pub use config::RunConfig;
pub use error::{Error, Result};
pub use git::{BranchSource, RepoSlug};
pub use secrets::Token;
pub use sync::{SyncOptions, SyncReport};
