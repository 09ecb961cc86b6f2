//! # AttrSync Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the remote document store, the
//!   attribute dataset and the outcome report
//! - Folder tree traversal
//! - Dataset row matching and payload construction
//! - The sync orchestrator
//!
//! ## Architecture Principles
//! - Only depends on `attrsync-domain`
//! - No HTTP, filesystem or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod matching;
pub mod payload;
pub mod sync;
pub mod traversal;

// Re-export specific items to avoid ambiguity
pub use matching::match_row;
pub use payload::{build_payload, normalize_date};
pub use sync::ports::{AttributeUpdater, DatasetSource, ReportSink};
pub use sync::{SyncOptions, SyncService};
pub use traversal::ports::FolderBrowser;
pub use traversal::TreeWalker;
