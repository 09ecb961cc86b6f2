//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If a required variable is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! Required:
//! - `APS_CLIENT_ID`: APS application client id
//! - `APS_CLIENT_SECRET`: APS application client secret
//! - `PROJECT_ID`: Data Management project id (`b.` prefixed)
//! - `ROOT_FOLDER_URN`: Folder to start the walk from
//!
//! Optional:
//! - `APS_BASE_URL`: API host (default `https://developer.api.autodesk.com`)
//! - `ATTRSYNC_DATASET_PATH`: Attribute dataset file
//! - `ATTRSYNC_REPORT_PATH`: Where the outcome report is written
//! - `ATTRSYNC_REQUEST_SPACING_MS`: Minimum spacing between update attempts
//! - `ATTRSYNC_HTTP_TIMEOUT_SECS`: Per-request timeout
//! - `ATTRSYNC_HTTP_MAX_ATTEMPTS`: Attempts per request, including the first
//! - `ATTRSYNC_LOG_LEVEL`: Default log filter when `RUST_LOG` is unset
//! - `ATTRSYNC_LOG_FORMAT`: `pretty` or `json`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./attrsync.json` or `./attrsync.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use attrsync_domain::constants::DEFAULT_APS_BASE_URL;
use attrsync_domain::{
    ApsConfig, AttrSyncError, Config, HttpSettings, LogFormat, LoggingConfig, Result, SyncSettings,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `AttrSyncError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The four credential and project variables must be present; the rest fall
/// back to defaults.
///
/// # Errors
/// Returns `AttrSyncError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let aps = ApsConfig {
        base_url: env_or("APS_BASE_URL", DEFAULT_APS_BASE_URL),
        client_id: env_var("APS_CLIENT_ID")?,
        client_secret: env_var("APS_CLIENT_SECRET")?,
        project_id: env_var("PROJECT_ID")?,
        root_folder_urn: env_var("ROOT_FOLDER_URN")?,
    };

    let sync_defaults = SyncSettings::default();
    let sync = SyncSettings {
        dataset_path: env_or("ATTRSYNC_DATASET_PATH", &sync_defaults.dataset_path),
        report_path: env_or("ATTRSYNC_REPORT_PATH", &sync_defaults.report_path),
        request_spacing_ms: env_parse(
            "ATTRSYNC_REQUEST_SPACING_MS",
            sync_defaults.request_spacing_ms,
            "request spacing",
        )?,
    };

    let http_defaults = HttpSettings::default();
    let http = HttpSettings {
        timeout_seconds: env_parse(
            "ATTRSYNC_HTTP_TIMEOUT_SECS",
            http_defaults.timeout_seconds,
            "HTTP timeout",
        )?,
        max_attempts: env_parse(
            "ATTRSYNC_HTTP_MAX_ATTEMPTS",
            http_defaults.max_attempts,
            "HTTP max attempts",
        )?,
    };

    let logging_defaults = LoggingConfig::default();
    let logging = LoggingConfig {
        level: env_or("ATTRSYNC_LOG_LEVEL", &logging_defaults.level),
        format: match std::env::var("ATTRSYNC_LOG_FORMAT") {
            Ok(raw) => LogFormat::from_str(&raw)
                .map_err(|e| AttrSyncError::Config(format!("Invalid log format: {}", e)))?,
            Err(_) => logging_defaults.format,
        },
    };

    Ok(Config { aps, sync, http, logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `AttrSyncError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(AttrSyncError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            AttrSyncError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| AttrSyncError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AttrSyncError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AttrSyncError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(AttrSyncError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 6] = [
        "attrsync.json",
        "attrsync.toml",
        "config.json",
        "config.toml",
        "../config.json",
        "../config.toml",
    ];

    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        AttrSyncError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable with a default
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an optional environment variable, falling back to `default` when unset
fn env_parse<T>(key: &str, default: T, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AttrSyncError::Config(format!("Invalid {}: {}", what, e))),
        Err(_) => Ok(default),
    }
}
