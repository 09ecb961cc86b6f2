//! Port interfaces for remote folder traversal

use async_trait::async_trait;
use attrsync_domain::{FolderEntry, Result};

/// Lists the immediate children of a remote folder.
#[async_trait]
pub trait FolderBrowser: Send + Sync {
    /// Fetch the direct children of `folder_id`, in the order the remote
    /// store returns them.
    async fn list_children(&self, folder_id: &str) -> Result<Vec<FolderEntry>>;
}
