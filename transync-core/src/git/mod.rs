//! Git operations on the translations repository
//!
//! Cloning and identity setup live in `clone`, stale branch cleanup in
//! `branch`. All git work goes through a [`crate::CommandRunner`].

mod branch;
mod clone;
mod repo;

pub use branch::{
    clean_up_branches, delete_branch, is_stale_branch, local_delete_args, remote_delete_args,
    select_stale_branches, BranchDeletion, BranchSource, CleanupReport, PROTECTED_BRANCH,
    STALE_BRANCH_PREFIXES,
};
pub use clone::{clone_args, clone_url, identity_args, prepare_repository};
pub use repo::{RepoSlug, GITHUB_HOST};
