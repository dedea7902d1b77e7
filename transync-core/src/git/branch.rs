//! Stale branch cleanup for the translations repository
//!
//! Sync tooling leaves branches behind on every run. Anything matching one of
//! [`STALE_BRANCH_PREFIXES`] is deleted from the clone and from the remote;
//! [`PROTECTED_BRANCH`] must be present in the listing and is never touched.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::command::{CommandRunner, Strictness};
use crate::sync::SyncOptions;
use crate::{Error, Result};

/// Default branch of the translations repository
pub const PROTECTED_BRANCH: &str = "main";

/// Prefixes of branches created by sync and translation tooling
pub const STALE_BRANCH_PREFIXES: [&str; 4] = [
    "content-sync-",
    "l10n_main",
    "add/translators-file",
    "add/status-file",
];

/// Source of the remote branch listing
#[async_trait]
pub trait BranchSource: Send + Sync {
    /// Names of all branches, in the order the remote returns them
    async fn branch_names(&self) -> Result<Vec<String>>;
}

/// Whether a branch name carries one of the stale prefixes
pub fn is_stale_branch(name: &str) -> bool {
    STALE_BRANCH_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Drop the protected branch and keep stale branches, preserving order
///
/// Fails if the protected branch is not in the listing.
pub fn select_stale_branches(mut branches: Vec<String>) -> Result<Vec<String>> {
    let protected = branches
        .iter()
        .position(|name| name == PROTECTED_BRANCH)
        .ok_or_else(|| Error::ProtectedBranchMissing(PROTECTED_BRANCH.to_string()))?;
    branches.remove(protected);

    Ok(branches
        .into_iter()
        .filter(|name| is_stale_branch(name))
        .collect())
}

/// Outcome of deleting one branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchDeletion {
    pub branch: String,
    /// Exit code of `git branch -d`
    pub local_code: i32,
    /// Exit code of `git push origin --delete`
    pub remote_code: i32,
}

impl BranchDeletion {
    pub fn remote_deleted(&self) -> bool {
        self.remote_code == 0
    }
}

/// What a cleanup pass found and did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Branches selected for deletion
    pub candidates: Vec<String>,
    /// Deletions attempted; empty on a dry run
    pub deletions: Vec<BranchDeletion>,
}

/// `git branch -d <name>`
pub fn local_delete_args(branch: &str) -> Vec<String> {
    crate::args!["git", "branch", "-d", branch]
}

/// `git push origin --delete <name>`
pub fn remote_delete_args(branch: &str) -> Vec<String> {
    crate::args!["git", "push", "origin", "--delete", branch]
}

/// Delete one branch locally, then on `origin`
///
/// Both commands always run; exit codes are only reported.
pub async fn delete_branch<R>(runner: &R, clone_dir: &Path, branch: &str) -> Result<BranchDeletion>
where
    R: CommandRunner + ?Sized,
{
    info!(branch, "Deleting branch");

    let local = runner.run(&local_delete_args(branch), Some(clone_dir)).await?;
    if !local.success() {
        debug!(branch, code = local.code, "Local branch not deleted");
    }

    let remote = runner.run(&remote_delete_args(branch), Some(clone_dir)).await?;
    if !remote.success() {
        warn!(branch, code = remote.code, "Remote branch not deleted");
    }

    Ok(BranchDeletion {
        branch: branch.to_string(),
        local_code: local.code,
        remote_code: remote.code,
    })
}

/// List remote branches and delete every stale one
///
/// Listing failures and a missing protected branch abort before anything is
/// deleted. In strict mode, failed remote deletions are reported together
/// once every candidate has been attempted.
pub async fn clean_up_branches<R, S>(
    runner: &R,
    source: &S,
    clone_dir: &Path,
    options: &SyncOptions,
) -> Result<CleanupReport>
where
    R: CommandRunner + ?Sized,
    S: BranchSource + ?Sized,
{
    let branches = source.branch_names().await?;
    debug!(count = branches.len(), "Fetched remote branches");

    let candidates = select_stale_branches(branches)?;
    info!(count = candidates.len(), ?candidates, "Selected stale branches");

    if options.dry_run {
        info!("Dry run, not deleting branches");
        return Ok(CleanupReport {
            candidates,
            deletions: Vec::new(),
        });
    }

    let mut deletions = Vec::with_capacity(candidates.len());
    for branch in &candidates {
        deletions.push(delete_branch(runner, clone_dir, branch).await?);
    }

    if options.strictness == Strictness::Strict {
        let failed: Vec<String> = deletions
            .iter()
            .filter(|d| !d.remote_deleted())
            .map(|d| d.branch.clone())
            .collect();
        if !failed.is_empty() {
            return Err(Error::DeletionFailed(failed));
        }
    }

    Ok(CleanupReport {
        candidates,
        deletions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{commands, EventLog, RecordingRunner, StaticBranches};

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_is_stale_branch() {
        assert!(is_stale_branch("content-sync-2024"));
        assert!(is_stale_branch("l10n_main"));
        assert!(is_stale_branch("l10n_main_en"));
        assert!(is_stale_branch("add/translators-file-es"));
        assert!(is_stale_branch("add/status-file"));
        assert!(!is_stale_branch("main"));
        assert!(!is_stale_branch("feature-x"));
        assert!(!is_stale_branch("content-sync"));
        assert!(!is_stale_branch("l10n_other"));
    }

    #[test]
    fn test_select_stale_branches() {
        let selected = select_stale_branches(names(&[
            "main",
            "content-sync-2024",
            "l10n_main_en",
            "feature-x",
            "add/status-file-jp",
        ]))
        .unwrap();
        assert_eq!(
            selected,
            names(&["content-sync-2024", "l10n_main_en", "add/status-file-jp"])
        );
    }

    #[test]
    fn test_select_preserves_remote_order() {
        let selected = select_stale_branches(names(&[
            "l10n_main_zz",
            "content-sync-b",
            "main",
            "content-sync-a",
        ]))
        .unwrap();
        assert_eq!(selected, names(&["l10n_main_zz", "content-sync-b", "content-sync-a"]));
    }

    #[test]
    fn test_select_requires_protected_branch() {
        let err = select_stale_branches(names(&["master", "content-sync-1"])).unwrap_err();
        assert!(matches!(err, Error::ProtectedBranchMissing(ref b) if b == "main"));
    }

    #[tokio::test]
    async fn test_missing_protected_branch_deletes_nothing() {
        let log = EventLog::default();
        let runner = RecordingRunner::new(log.clone());
        let source = StaticBranches::new(log.clone(), &["content-sync-1"]);

        let options = SyncOptions::default();
        let result = clean_up_branches(&runner, &source, Path::new("/work/t"), &options).await;
        assert!(matches!(result, Err(Error::ProtectedBranchMissing(_))));
        assert!(commands(&log).is_empty());
    }

    #[tokio::test]
    async fn test_listing_failure_propagates() {
        let log = EventLog::default();
        let runner = RecordingRunner::new(log.clone());
        let source = StaticBranches::failing(log.clone());

        let options = SyncOptions::default();
        let result = clean_up_branches(&runner, &source, Path::new("/work/t"), &options).await;
        assert!(matches!(result, Err(Error::RemoteListing(_))));
        assert!(commands(&log).is_empty());
    }

    #[tokio::test]
    async fn test_local_failure_does_not_skip_remote_delete() {
        let log = EventLog::default();
        let runner = RecordingRunner::new(log.clone()).failing_when(|args| args[1] == "branch");
        let source = StaticBranches::new(
            log.clone(),
            &["main", "content-sync-1", "add/status-file-de"],
        );
        let clone_dir = Path::new("/work/t");

        let report = clean_up_branches(&runner, &source, clone_dir, &SyncOptions::default())
            .await
            .unwrap();

        assert_eq!(
            commands(&log),
            vec![
                local_delete_args("content-sync-1"),
                remote_delete_args("content-sync-1"),
                local_delete_args("add/status-file-de"),
                remote_delete_args("add/status-file-de"),
            ]
        );
        assert!(log.events().iter().skip(1).all(|e| e.cwd() == Some(clone_dir)));
        assert!(report.deletions.iter().all(|d| d.local_code != 0 && d.remote_deleted()));
    }

    #[tokio::test]
    async fn test_lenient_swallows_remote_failures() {
        let log = EventLog::default();
        let runner = RecordingRunner::new(log.clone()).failing_when(|args| args[1] == "push");
        let source = StaticBranches::new(log.clone(), &["main", "content-sync-1"]);

        let options = SyncOptions::default();
        let report = clean_up_branches(&runner, &source, Path::new("/work/t"), &options)
            .await
            .unwrap();
        assert_eq!(report.deletions.len(), 1);
        assert!(!report.deletions[0].remote_deleted());
    }

    #[tokio::test]
    async fn test_strict_attempts_all_then_reports_failures() {
        let log = EventLog::default();
        let runner = RecordingRunner::new(log.clone())
            .failing_when(|args| args[1] == "push" && args[4].starts_with("content-sync-"));
        let source = StaticBranches::new(
            log.clone(),
            &["main", "content-sync-1", "l10n_main", "content-sync-2"],
        );
        let options = SyncOptions {
            strictness: Strictness::Strict,
            dry_run: false,
        };

        let err = clean_up_branches(&runner, &source, Path::new("/work/t"), &options)
            .await
            .unwrap_err();
        match err {
            Error::DeletionFailed(failed) => {
                assert_eq!(failed, names(&["content-sync-1", "content-sync-2"]));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(commands(&log).len(), 6);
    }

    #[tokio::test]
    async fn test_dry_run_deletes_nothing() {
        let log = EventLog::default();
        let runner = RecordingRunner::new(log.clone());
        let source = StaticBranches::new(log.clone(), &["main", "content-sync-1"]);
        let options = SyncOptions {
            dry_run: true,
            ..SyncOptions::default()
        };

        let report = clean_up_branches(&runner, &source, Path::new("/work/t"), &options)
            .await
            .unwrap();
        assert_eq!(report.candidates, names(&["content-sync-1"]));
        assert!(report.deletions.is_empty());
        assert!(commands(&log).is_empty());
    }
}
