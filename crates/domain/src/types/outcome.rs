//! Per-file sync outcomes and the run report

use serde::{Deserialize, Serialize};

/// Skip reason used when no dataset was available for the run.
pub const SKIP_NO_DATASET: &str = "no_dataset";
/// Skip reason used for dry runs.
pub const SKIP_DRY_RUN: &str = "dry_run";
/// Failure reason used when the current version could not be resolved.
pub const FAIL_VERSION_LOOKUP: &str = "Version lookup failed";

/// Status column of the persisted report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Failed,
    Skipped,
}

crate::impl_domain_status_conversions!(OutcomeStatus {
    Success => "success",
    Failed => "failed",
    Skipped => "skipped",
});

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutcomeKind {
    Success { attribute_count: usize },
    Failed { reason: String },
    Skipped { reason: String },
}

impl OutcomeKind {
    pub fn status(&self) -> OutcomeStatus {
        match self {
            Self::Success { .. } => OutcomeStatus::Success,
            Self::Failed { .. } => OutcomeStatus::Failed,
            Self::Skipped { .. } => OutcomeStatus::Skipped,
        }
    }
}

/// Outcome record for one remote file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub file_id: String,
    pub path: String,
    pub kind: OutcomeKind,
}

impl SyncOutcome {
    pub fn success(file_id: &str, path: &str, attribute_count: usize) -> Self {
        Self::with_kind(file_id, path, OutcomeKind::Success { attribute_count })
    }

    pub fn failed(file_id: &str, path: &str, reason: impl Into<String>) -> Self {
        Self::with_kind(file_id, path, OutcomeKind::Failed { reason: reason.into() })
    }

    pub fn skipped(file_id: &str, path: &str, reason: impl Into<String>) -> Self {
        Self::with_kind(file_id, path, OutcomeKind::Skipped { reason: reason.into() })
    }

    fn with_kind(file_id: &str, path: &str, kind: OutcomeKind) -> Self {
        Self { file_id: file_id.to_string(), path: path.to_string(), kind }
    }

    pub fn status(&self) -> OutcomeStatus {
        self.kind.status()
    }
}

/// Running tally of outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SyncSummary {
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl SyncSummary {
    pub fn record(&mut self, status: OutcomeStatus) {
        match status {
            OutcomeStatus::Success => self.success += 1,
            OutcomeStatus::Failed => self.failed += 1,
            OutcomeStatus::Skipped => self.skipped += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.success + self.failed + self.skipped
    }
}

/// Flat report row: `file`, `status`, and either `reason` or `attrs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub file: String,
    pub status: OutcomeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<usize>,
}

impl From<&SyncOutcome> for ReportRecord {
    fn from(outcome: &SyncOutcome) -> Self {
        let (reason, attrs) = match &outcome.kind {
            OutcomeKind::Success { attribute_count } => (None, Some(*attribute_count)),
            OutcomeKind::Failed { reason } | OutcomeKind::Skipped { reason } => {
                (Some(reason.clone()), None)
            }
        };
        Self { file: outcome.path.clone(), status: outcome.status(), reason, attrs }
    }
}

/// Outcomes of a full run, in traversal order, with their tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SyncReport {
    outcomes: Vec<SyncOutcome>,
    summary: SyncSummary,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: SyncOutcome) {
        self.summary.record(outcome.status());
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[SyncOutcome] {
        &self.outcomes
    }

    pub fn summary(&self) -> SyncSummary {
        self.summary
    }

    pub fn records(&self) -> Vec<ReportRecord> {
        self.outcomes.iter().map(ReportRecord::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_tallies_in_order() {
        let mut report = SyncReport::new();
        report.push(SyncOutcome::success("urn:1", "A/x.pdf", 4));
        report.push(SyncOutcome::skipped("urn:2", "A/y.pdf", "not_matched"));
        report.push(SyncOutcome::failed("urn:3", "A/z.pdf", FAIL_VERSION_LOOKUP));

        let summary = report.summary();
        assert_eq!((summary.success, summary.failed, summary.skipped), (1, 1, 1));
        assert_eq!(summary.total(), 3);

        let paths: Vec<&str> = report.outcomes().iter().map(|o| o.path.as_str()).collect();
        assert_eq!(paths, ["A/x.pdf", "A/y.pdf", "A/z.pdf"]);
    }

    #[test]
    fn records_carry_reason_or_attribute_count() {
        let ok = ReportRecord::from(&SyncOutcome::success("urn:1", "x.pdf", 2));
        assert_eq!(ok.attrs, Some(2));
        assert_eq!(ok.reason, None);

        let skipped = ReportRecord::from(&SyncOutcome::skipped("urn:2", "y.pdf", "not_matched"));
        assert_eq!(skipped.status, OutcomeStatus::Skipped);
        assert_eq!(skipped.reason.as_deref(), Some("not_matched"));

        let json = serde_json::to_string(&ok).unwrap();
        assert_eq!(json, r#"{"file":"x.pdf","status":"success","attrs":2}"#);
    }
}
