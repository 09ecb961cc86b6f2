//! Port interfaces for the attribute sync run

use async_trait::async_trait;
use attrsync_domain::{Dataset, Result, SyncReport, UpdatePayload, VersionRef};

/// Writes custom attributes to remote documents.
#[async_trait]
pub trait AttributeUpdater: Send + Sync {
    /// Resolve the current version of the document `file_id`.
    async fn resolve_current_version(&self, file_id: &str) -> Result<VersionRef>;

    /// Apply `payload` to `version`. An `Err` carries a short diagnostic.
    async fn apply_attributes(&self, version: &VersionRef, payload: &UpdatePayload) -> Result<()>;
}

/// Supplies the attribute dataset for a run.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Load the dataset. `Ok(None)` means no dataset exists for this run.
    async fn load(&self) -> Result<Option<Dataset>>;
}

/// Persists the outcome report of a run.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn write(&self, report: &SyncReport) -> Result<()>;
}
