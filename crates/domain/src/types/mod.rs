//! Domain types and models

pub mod dataset;
pub mod matching;
pub mod outcome;
pub mod payload;
pub mod remote;
pub mod schema;

pub use dataset::{AttributeRow, CellValue, Dataset};
pub use matching::{MatchResult, MatchStrategy};
pub use outcome::{
    OutcomeKind, OutcomeStatus, ReportRecord, SyncOutcome, SyncReport, SyncSummary,
    FAIL_VERSION_LOOKUP, SKIP_DRY_RUN, SKIP_NO_DATASET,
};
pub use payload::{AttributeValue, UpdatePayload};
pub use remote::{join_path, EntryKind, FolderEntry, FolderNode, RemoteFile, VersionRef};
pub use schema::{is_date_column, AttributeId, AttributeSchema};
