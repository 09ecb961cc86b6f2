//! # AttrSync Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client with retry and backoff
//! - Autodesk Platform Services adapters (auth, folder browsing, tip lookup,
//!   custom attribute updates)
//! - Workbook and JSON dataset sources and report sinks
//! - Configuration loading and logging setup
//!
//! ## Architecture
//! - Implements traits defined in `attrsync-core`
//! - Contains all "impure" code (network, filesystem, process-wide logging)

pub mod aps;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod http;
pub mod observability;
pub mod report;

// Re-export commonly used items
pub use aps::{AccessTokenProvider, ApsClient, ClientCredentialsAuth};
pub use dataset::{source_for_path, JsonDatasetSource, SpreadsheetDatasetSource};
pub use errors::InfraError;
pub use http::HttpClient;
pub use report::{sink_for_path, JsonReportSink, SpreadsheetReportSink};
