//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_APS_BASE_URL, DEFAULT_DATASET_PATH, DEFAULT_REPORT_PATH, DEFAULT_REQUEST_SPACING_MS,
};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub aps: ApsConfig,
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Autodesk Platform Services credentials and project coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApsConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
    /// Data Management project id, including the `b.` prefix
    pub project_id: String,
    pub root_folder_urn: String,
}

/// Sync run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    pub dataset_path: String,
    pub report_path: String,
    /// Minimum spacing between consecutive remote update attempts
    pub request_spacing_ms: u64,
}

/// Outbound HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_seconds: u64,
    pub max_attempts: usize,
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

crate::impl_domain_status_conversions!(LogFormat {
    Pretty => "pretty",
    Json => "json",
});

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

fn default_base_url() -> String {
    DEFAULT_APS_BASE_URL.to_string()
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            dataset_path: DEFAULT_DATASET_PATH.to_string(),
            report_path: DEFAULT_REPORT_PATH.to_string(),
            request_spacing_ms: DEFAULT_REQUEST_SPACING_MS,
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_seconds: 30, max_attempts: 3 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Pretty }
    }
}

impl ApsConfig {
    /// Project id as expected by the Docs API (without the `b.` prefix).
    pub fn docs_project_id(&self) -> &str {
        self.project_id.strip_prefix("b.").unwrap_or(&self.project_id)
    }
}
