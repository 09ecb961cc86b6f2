//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Dataset columns consulted by the matcher
pub const FILE_NAME_COLUMN: &str = "file_name";
pub const FILE_ID_COLUMN: &str = "acc_file_id";

// Substrings that mark an `acc_file_id` cell as a remote identifier
pub const IDENTIFIER_MARKERS: [&str; 2] = ["urn:adsk", "dm.lineage"];
pub const URN_SCHEME_PREFIX: &str = "urn:";

// Custom attribute definitions configured on the ACC project
pub const ATTRIBUTE_DEFINITIONS: [(&str, i64); 9] = [
    ("Package ID", 7_374_741),
    ("Package Name", 7_374_744),
    ("Contractor", 7_374_759),
    ("Location", 7_374_769),
    ("Planned Start", 7_374_777),
    ("Planned End", 7_374_783),
    ("Actual Start", 7_374_787),
    ("Actual End", 7_374_795),
    ("% Completion", 7_374_805),
];

// Columns whose name contains one of these (case-insensitive) carry dates
pub const DATE_COLUMN_HINTS: [&str; 2] = ["start", "end"];

// Accepted input date formats, tried in order
pub const DATE_INPUT_FORMATS: [&str; 5] = ["%d-%b-%y", "%d-%b-%Y", "%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];
pub const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%dT00:00:00.000Z";

// Fallback display name for listing entries without one
pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown";
pub const PATH_SEPARATOR: &str = "/";

// Sync defaults
pub const DEFAULT_REQUEST_SPACING_MS: u64 = 500;
pub const DEFAULT_DATASET_PATH: &str = "acc_file_attributes.xlsx";
pub const DEFAULT_REPORT_PATH: &str = "bulk_update_results.xlsx";
pub const DEFAULT_APS_BASE_URL: &str = "https://developer.api.autodesk.com";
