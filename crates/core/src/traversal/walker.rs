//! Depth-first folder tree walker
//!
//! Flattens a remote folder hierarchy into the files it contains, in
//! pre-order: a subfolder's files appear in place, before the subfolder's
//! later siblings. The walk keeps an explicit frontier stack instead of
//! recursing, so tree depth is bounded only by memory.
//!
//! A folder whose listing fails contributes no files. The failure is logged
//! and the walk moves on to the next pending entry.

use std::sync::Arc;

use attrsync_domain::{EntryKind, FolderEntry, FolderNode, RemoteFile};
use futures::stream::{self, BoxStream, StreamExt};
use tracing::{debug, warn};

use super::ports::FolderBrowser;

/// Work item on the traversal frontier.
enum Pending {
    Folder(FolderNode),
    File(RemoteFile),
}

/// Walks a remote folder tree through a [`FolderBrowser`].
#[derive(Clone)]
pub struct TreeWalker {
    browser: Arc<dyn FolderBrowser>,
}

impl TreeWalker {
    pub fn new(browser: Arc<dyn FolderBrowser>) -> Self {
        Self { browser }
    }

    /// Lazily stream every file below `root_folder_id`.
    ///
    /// Folders are listed only when the stream reaches them. Each call starts
    /// a fresh walk.
    pub fn walk(&self, root_folder_id: &str) -> BoxStream<'static, RemoteFile> {
        let browser = Arc::clone(&self.browser);
        let frontier = vec![Pending::Folder(FolderNode::root(root_folder_id))];

        stream::unfold((browser, frontier), |(browser, mut frontier)| async move {
            while let Some(next) = frontier.pop() {
                match next {
                    Pending::File(file) => return Some((file, (browser, frontier))),
                    Pending::Folder(folder) => {
                        let children = expand(browser.as_ref(), &folder).await;
                        // reversed so the first child is popped first
                        frontier.extend(children.into_iter().rev());
                    }
                }
            }
            None
        })
        .boxed()
    }

    /// Walk the whole tree and collect the files in traversal order.
    pub async fn collect(&self, root_folder_id: &str) -> Vec<RemoteFile> {
        self.walk(root_folder_id).collect().await
    }
}

async fn expand(browser: &dyn FolderBrowser, folder: &FolderNode) -> Vec<Pending> {
    let entries = match browser.list_children(&folder.id).await {
        Ok(entries) => entries,
        Err(err) => {
            warn!(
                folder_id = %folder.id,
                path = %folder.path,
                error = %err,
                "Folder listing failed; treating folder as empty"
            );
            return Vec::new();
        }
    };

    debug!(folder_id = %folder.id, path = %folder.path, children = entries.len(), "Listed folder");

    entries.into_iter().filter_map(|entry| classify(folder, entry)).collect()
}

fn classify(parent: &FolderNode, entry: FolderEntry) -> Option<Pending> {
    let path = parent.child_path(&entry.display_name);
    match entry.kind {
        EntryKind::File => {
            debug!(path = %path, "Found file");
            Some(Pending::File(RemoteFile { id: entry.id, name: entry.display_name, path }))
        }
        EntryKind::Folder => {
            debug!(path = %path, "Scanning folder");
            Some(Pending::Folder(FolderNode { id: entry.id, path }))
        }
        EntryKind::Other(tag) => {
            debug!(path = %path, tag = %tag, "Ignoring entry of unrecognised type");
            None
        }
    }
}
