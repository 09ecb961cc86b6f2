//! In-memory document store implementing the remote ports

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use attrsync_core::{AttributeUpdater, FolderBrowser};
use attrsync_domain::{
    AttrSyncError, FolderEntry, Result as DomainResult, UpdatePayload, VersionRef,
};
use tokio::time::Instant;

/// Folder tree plus per-document attribute state.
#[derive(Default)]
pub struct InMemoryDocuments {
    folders: HashMap<String, Vec<FolderEntry>>,
    broken_folders: HashSet<String>,
    missing_versions: HashSet<String>,
    rejected_files: HashSet<String>,
    applied: Mutex<Vec<(VersionRef, UpdatePayload)>>,
    update_times: Mutex<Vec<Instant>>,
}

impl InMemoryDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_folder(mut self, id: &str, children: Vec<FolderEntry>) -> Self {
        self.folders.insert(id.to_string(), children);
        self
    }

    /// Listing `id` fails.
    pub fn with_broken_folder(mut self, id: &str) -> Self {
        self.broken_folders.insert(id.to_string());
        self
    }

    /// Version lookup for `file_id` fails.
    pub fn with_missing_version(mut self, file_id: &str) -> Self {
        self.missing_versions.insert(file_id.to_string());
        self
    }

    /// Attribute updates for `file_id` are rejected with status 400.
    pub fn with_rejected_file(mut self, file_id: &str) -> Self {
        self.rejected_files.insert(file_id.to_string());
        self
    }

    pub fn applied(&self) -> Vec<(VersionRef, UpdatePayload)> {
        self.applied.lock().unwrap().clone()
    }

    /// Instants at which update attempts started.
    pub fn update_times(&self) -> Vec<Instant> {
        self.update_times.lock().unwrap().clone()
    }

    fn version_for(file_id: &str) -> VersionRef {
        VersionRef(format!("{file_id}?version=1"))
    }
}

#[async_trait]
impl FolderBrowser for InMemoryDocuments {
    async fn list_children(&self, folder_id: &str) -> DomainResult<Vec<FolderEntry>> {
        if self.broken_folders.contains(folder_id) {
            return Err(AttrSyncError::Network(format!("listing {folder_id} failed")));
        }
        Ok(self.folders.get(folder_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl AttributeUpdater for InMemoryDocuments {
    async fn resolve_current_version(&self, file_id: &str) -> DomainResult<VersionRef> {
        self.update_times.lock().unwrap().push(Instant::now());
        if self.missing_versions.contains(file_id) {
            return Err(AttrSyncError::VersionResolution(format!("no tip for {file_id}")));
        }
        Ok(Self::version_for(file_id))
    }

    async fn apply_attributes(
        &self,
        version: &VersionRef,
        payload: &UpdatePayload,
    ) -> DomainResult<()> {
        let rejected = self.rejected_files.iter().any(|id| Self::version_for(id) == *version);
        if rejected {
            return Err(AttrSyncError::Update("Status 400".into()));
        }
        self.applied.lock().unwrap().push((version.clone(), payload.clone()));
        Ok(())
    }
}
