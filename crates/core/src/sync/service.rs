//! Attribute sync orchestration
//!
//! One run walks the remote tree once, then processes every discovered file
//! in traversal order: match a dataset row, build the payload, resolve the
//! current version and apply the attributes. Every file gets exactly one
//! outcome; no per-file failure stops the run.

use std::sync::Arc;
use std::time::Duration;

use attrsync_domain::{
    AttrSyncError, AttributeSchema, Dataset, RemoteFile, SyncOutcome, SyncReport,
    FAIL_VERSION_LOOKUP, SKIP_DRY_RUN, SKIP_NO_DATASET,
};
use tracing::{debug, error, info, instrument, warn};

use super::pacer::RequestPacer;
use super::ports::AttributeUpdater;
use crate::matching::match_row;
use crate::payload::build_payload;
use crate::traversal::{FolderBrowser, TreeWalker};

/// Run-level options.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Minimum spacing between consecutive remote update attempts
    pub request_spacing: Duration,
    /// Match and build payloads without calling the update endpoints
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self { request_spacing: Duration::from_millis(500), dry_run: false }
    }
}

/// Drives tree walking, matching, payload building and remote updates.
pub struct SyncService {
    walker: TreeWalker,
    updater: Arc<dyn AttributeUpdater>,
    schema: Arc<AttributeSchema>,
    options: SyncOptions,
}

impl SyncService {
    /// Create a new sync service with default options
    pub fn new(
        browser: Arc<dyn FolderBrowser>,
        updater: Arc<dyn AttributeUpdater>,
        schema: Arc<AttributeSchema>,
    ) -> Self {
        Self { walker: TreeWalker::new(browser), updater, schema, options: SyncOptions::default() }
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    /// Walk the tree below `root_folder_id` and return every file found.
    #[instrument(skip(self))]
    pub async fn discover(&self, root_folder_id: &str) -> Vec<RemoteFile> {
        let files = self.walker.collect(root_folder_id).await;
        info!(count = files.len(), "Folder scan complete");
        files
    }

    /// Discover and process in one go.
    pub async fn run(&self, root_folder_id: &str, dataset: Option<&Dataset>) -> SyncReport {
        let files = self.discover(root_folder_id).await;
        self.process(&files, dataset).await
    }

    /// Process `files` in order. `dataset = None` skips every file.
    #[instrument(skip_all, fields(files = files.len(), dry_run = self.options.dry_run))]
    pub async fn process(&self, files: &[RemoteFile], dataset: Option<&Dataset>) -> SyncReport {
        let mut report = SyncReport::new();
        let mut pacer = RequestPacer::new(self.options.request_spacing);
        let total = files.len();

        for (index, file) in files.iter().enumerate() {
            debug!(position = index + 1, total, path = %file.path, "Processing file");

            let outcome = match dataset {
                Some(dataset) => self.process_file(file, dataset, &mut pacer).await,
                None => SyncOutcome::skipped(&file.id, &file.path, SKIP_NO_DATASET),
            };
            report.push(outcome);
        }

        let summary = report.summary();
        info!(
            success = summary.success,
            failed = summary.failed,
            skipped = summary.skipped,
            total = summary.total(),
            "Sync run complete"
        );

        report
    }

    async fn process_file(
        &self,
        file: &RemoteFile,
        dataset: &Dataset,
        pacer: &mut RequestPacer,
    ) -> SyncOutcome {
        let matched = match_row(&file.name, &file.id, dataset);
        let Some(row) = matched.row else {
            info!(path = %file.path, "Skipped - no matching dataset row");
            return SyncOutcome::skipped(&file.id, &file.path, matched.strategy.to_string());
        };

        let payload = build_payload(row, &self.schema);
        info!(
            path = %file.path,
            strategy = %matched.strategy,
            attributes = payload.len(),
            "Matched dataset row"
        );

        if self.options.dry_run {
            return SyncOutcome::skipped(&file.id, &file.path, SKIP_DRY_RUN);
        }

        pacer.ready().await;

        let version = match self.updater.resolve_current_version(&file.id).await {
            Ok(version) => version,
            Err(err) => {
                error!(path = %file.path, file_id = %file.id, error = %err, "Failed to resolve current version");
                return SyncOutcome::failed(&file.id, &file.path, FAIL_VERSION_LOOKUP);
            }
        };

        match self.updater.apply_attributes(&version, &payload).await {
            Ok(()) => {
                info!(path = %file.path, attributes = payload.len(), "Updated attributes");
                SyncOutcome::success(&file.id, &file.path, payload.len())
            }
            Err(err) => {
                warn!(path = %file.path, version = %version, error = %err, "Attribute update failed");
                SyncOutcome::failed(&file.id, &file.path, diagnostic(&err))
            }
        }
    }
}

/// Short failure reason for the report.
fn diagnostic(err: &AttrSyncError) -> String {
    match err {
        AttrSyncError::Update(message) => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use attrsync_domain::{
        CellValue, FolderEntry, OutcomeKind, Result, UpdatePayload, VersionRef,
    };

    use super::*;

    struct StaticTree(Vec<FolderEntry>);

    #[async_trait]
    impl FolderBrowser for StaticTree {
        async fn list_children(&self, _folder_id: &str) -> Result<Vec<FolderEntry>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct RecordingUpdater {
        unresolvable: Vec<String>,
        rejected: Vec<String>,
        applied: Mutex<HashMap<String, UpdatePayload>>,
    }

    #[async_trait]
    impl AttributeUpdater for RecordingUpdater {
        async fn resolve_current_version(&self, file_id: &str) -> Result<VersionRef> {
            if self.unresolvable.iter().any(|id| id == file_id) {
                return Err(AttrSyncError::VersionResolution("HTTP 404".into()));
            }
            Ok(VersionRef(format!("{file_id}?version=1")))
        }

        async fn apply_attributes(&self, version: &VersionRef, payload: &UpdatePayload) -> Result<()> {
            if self.rejected.iter().any(|id| version.as_str().starts_with(id.as_str())) {
                return Err(AttrSyncError::Update("Status 403".into()));
            }
            self.applied.lock().unwrap().insert(version.to_string(), payload.clone());
            Ok(())
        }
    }

    fn tree() -> Arc<StaticTree> {
        Arc::new(StaticTree(vec![
            FolderEntry::file("urn:1", "a.pdf"),
            FolderEntry::file("urn:2", "b.pdf"),
            FolderEntry::file("urn:3", "c.pdf"),
        ]))
    }

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["file_name".into(), "Contractor".into()],
            vec![
                vec![CellValue::from("a"), CellValue::from("Acme")],
                vec![CellValue::from("b.pdf"), CellValue::from("Beta")],
            ],
        )
        .unwrap()
    }

    fn service(updater: Arc<RecordingUpdater>) -> SyncService {
        SyncService::new(tree(), updater, Arc::new(AttributeSchema::project_default())).with_options(
            SyncOptions { request_spacing: Duration::ZERO, dry_run: false },
        )
    }

    #[tokio::test]
    async fn records_one_outcome_per_file_in_order() {
        let updater = Arc::new(RecordingUpdater::default());
        let data = dataset();
        let report = service(updater.clone()).run("root", Some(&data)).await;

        let kinds: Vec<&OutcomeKind> = report.outcomes().iter().map(|o| &o.kind).collect();
        assert_eq!(
            kinds,
            [
                &OutcomeKind::Success { attribute_count: 1 },
                &OutcomeKind::Success { attribute_count: 1 },
                &OutcomeKind::Skipped { reason: "not_matched".into() },
            ]
        );
        assert_eq!(updater.applied.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn version_and_update_failures_do_not_stop_the_run() {
        let updater = Arc::new(RecordingUpdater {
            unresolvable: vec!["urn:1".into()],
            rejected: vec!["urn:2".into()],
            ..Default::default()
        });
        let data = dataset();
        let report = service(updater).run("root", Some(&data)).await;

        let outcomes = report.outcomes();
        assert_eq!(outcomes[0].kind, OutcomeKind::Failed { reason: FAIL_VERSION_LOOKUP.into() });
        assert_eq!(outcomes[1].kind, OutcomeKind::Failed { reason: "Status 403".into() });
        assert_eq!(report.summary().failed, 2);
        assert_eq!(report.summary().total(), 3);
    }

    #[tokio::test]
    async fn empty_payloads_are_still_sent() {
        let updater = Arc::new(RecordingUpdater::default());
        let data = Dataset::new(
            vec!["file_name".into(), "Notes".into()],
            vec![vec![CellValue::from("a"), CellValue::from("not a schema column")]],
        )
        .unwrap();

        let report = service(updater.clone()).process(
            &[RemoteFile { id: "urn:1".into(), name: "a.pdf".into(), path: "a.pdf".into() }],
            Some(&data),
        )
        .await;

        assert_eq!(report.outcomes()[0].kind, OutcomeKind::Success { attribute_count: 0 });
        let applied = updater.applied.lock().unwrap();
        assert!(applied.get("urn:1?version=1").is_some_and(UpdatePayload::is_empty));
    }

    #[tokio::test]
    async fn missing_dataset_skips_every_file() {
        let updater = Arc::new(RecordingUpdater::default());
        let report = service(updater.clone()).run("root", None).await;

        assert_eq!(report.summary().skipped, 3);
        assert!(report
            .outcomes()
            .iter()
            .all(|o| o.kind == OutcomeKind::Skipped { reason: SKIP_NO_DATASET.into() }));
        assert!(updater.applied.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn dry_run_never_calls_the_updater() {
        let updater = Arc::new(RecordingUpdater::default());
        let data = dataset();
        let report = service(updater.clone())
            .with_options(SyncOptions { request_spacing: Duration::ZERO, dry_run: true })
            .run("root", Some(&data))
            .await;

        assert_eq!(report.summary().skipped, 3);
        assert_eq!(report.outcomes()[0].kind, OutcomeKind::Skipped { reason: SKIP_DRY_RUN.into() });
        assert!(updater.applied.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn update_attempts_are_spaced() {
        let updater = Arc::new(RecordingUpdater::default());
        let data = dataset();
        let start = tokio::time::Instant::now();

        let report = service(updater)
            .with_options(SyncOptions { request_spacing: Duration::from_millis(500), dry_run: false })
            .run("root", Some(&data))
            .await;

        assert_eq!(report.summary().success, 2);
        // two update attempts, one gap; the skipped third file makes no call
        assert_eq!(start.elapsed(), Duration::from_millis(500));
    }
}
