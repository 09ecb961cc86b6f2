//! Dataset row ↔ remote file matching

pub mod matcher;

pub use matcher::{is_remote_identifier, match_row, normalize_urn, strip_extension, MatchTarget};
