//! Remote document-store types

use serde::{Deserialize, Serialize};

use crate::constants::PATH_SEPARATOR;

/// A leaf document discovered while walking the remote folder tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteFile {
    /// Lineage (item) URN of the document
    pub id: String,
    /// Display name including extension, e.g. `A-101.pdf`
    pub name: String,
    /// Ancestor folder names and `name`, joined with `/`
    pub path: String,
}

/// A folder queued for listing during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    pub id: String,
    /// Display path of the folder itself (empty for the traversal root)
    pub path: String,
}

impl FolderNode {
    /// The traversal root: no path prefix.
    pub fn root(id: impl Into<String>) -> Self {
        Self { id: id.into(), path: String::new() }
    }

    /// Display path of a direct child named `name`.
    pub fn child_path(&self, name: &str) -> String {
        join_path(&self.path, name)
    }
}

/// Kind tag of a folder listing entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
    /// Any tag the walker does not recognise; such entries are ignored.
    Other(String),
}

/// One immediate child returned by a folder listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolderEntry {
    pub id: String,
    pub display_name: String,
    pub kind: EntryKind,
}

impl FolderEntry {
    pub fn file(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self { id: id.into(), display_name: display_name.into(), kind: EntryKind::File }
    }

    pub fn folder(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self { id: id.into(), display_name: display_name.into(), kind: EntryKind::Folder }
    }
}

/// Resolved handle to the current content revision of a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionRef(pub String);

impl VersionRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VersionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Join a parent display path and a child name. An empty parent yields the
/// bare name (no leading separator).
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}{PATH_SEPARATOR}{name}")
    }
}
