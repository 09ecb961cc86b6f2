//! Attribute sync run

pub mod pacer;
pub mod ports;
pub mod service;

pub use pacer::RequestPacer;
pub use ports::{AttributeUpdater, DatasetSource, ReportSink};
pub use service::{SyncOptions, SyncService};
