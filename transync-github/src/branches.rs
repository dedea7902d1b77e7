//! Branch listing

use async_trait::async_trait;
use octocrab::models::repos::Branch;
use tracing::debug;
use transync_core::BranchSource;

use crate::{GitHubClient, Result};

/// Largest page size the branches endpoint accepts
const PER_PAGE: u8 = 100;

impl GitHubClient {
    /// List all branches of the repository, following pagination
    pub async fn list_branches(&self) -> Result<Vec<Branch>> {
        debug!(owner = %self.owner(), repo = %self.repo(), "Listing branches");

        let first = self
            .client()
            .repos(self.owner(), self.repo())
            .list_branches()
            .per_page(PER_PAGE)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let branches = self
            .client()
            .all_pages(first)
            .await
            .map_err(|e| self.classify(e))?;

        debug!(count = branches.len(), "Listed branches");
        Ok(branches)
    }
}

#[async_trait]
impl BranchSource for GitHubClient {
    async fn branch_names(&self) -> transync_core::Result<Vec<String>> {
        let branches = self.list_branches().await?;
        Ok(branches.into_iter().map(|b| b.name).collect())
    }
}
