//! # AttrSync Domain
//!
//! Business domain types and models for AttrSync.
//!
//! This crate contains:
//! - Remote tree, dataset, matching, payload and outcome types
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants (attribute schema, date formats, identifier markers)
//!
//! ## Architecture
//! - No dependencies on other AttrSync crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
