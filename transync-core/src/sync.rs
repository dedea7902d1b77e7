//! One sync run: prepare the clone, then clean up stale branches

use std::path::{Path, PathBuf};

use tracing::info;

use crate::command::{CommandRunner, Strictness};
use crate::config::RunConfig;
use crate::git::{clean_up_branches, prepare_repository, BranchSource, CleanupReport};
use crate::Result;

/// Behaviour switches for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Treatment of failed git commands
    pub strictness: Strictness,
    /// Select stale branches without deleting them
    pub dry_run: bool,
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Working tree of the translations repository
    pub clone_dir: PathBuf,
    pub cleanup: CleanupReport,
}

/// Clone the translations repository into `base_dir` and prune its stale branches
///
/// The clone and identity setup finish before the branch listing is requested.
pub async fn run<R, S>(
    config: &RunConfig,
    base_dir: &Path,
    runner: &R,
    source: &S,
    options: &SyncOptions,
) -> Result<SyncReport>
where
    R: CommandRunner + ?Sized,
    S: BranchSource + ?Sized,
{
    let clone_dir = prepare_repository(runner, config, base_dir, options.strictness).await?;

    info!(repo = %config.repo, "Cleaning up branches");
    let cleanup = clean_up_branches(runner, source, &clone_dir, options).await?;

    Ok(SyncReport { clone_dir, cleanup })
}
