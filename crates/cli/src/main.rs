//! `attrsync` - push ACC document custom attributes from a dataset file.
//!
//! Walks the configured root folder, matches every document to a dataset
//! row, and writes the row's attribute values to the document's current
//! version. The per-file outcomes are saved as a workbook (or JSON) report.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use attrsync_core::{DatasetSource, ReportSink, SyncOptions, SyncService};
use attrsync_domain::{AttributeSchema, Config};
use attrsync_infra::observability::init_logging;
use attrsync_infra::{
    config, sink_for_path, source_for_path, ApsClient, ClientCredentialsAuth, HttpClient,
};
use clap::Parser;
use tracing::{info, warn};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "attrsync", version, about = "Sync ACC custom attributes from a dataset")]
struct Cli {
    /// Config file (JSON or TOML). Without it, environment then probed files are used.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Root folder URN, overriding the configured one.
    #[arg(long)]
    root_folder: Option<String>,

    /// Dataset workbook (or `.json` records file), overriding the configured path.
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Report workbook (or `.json` file), overriding the configured path.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    yes: bool,

    /// Match and build payloads without updating anything.
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => config::load_from_file(Some(path.clone())),
            None => config::load(),
        }
        .context("failed to load configuration")?;

        if let Some(root) = &self.root_folder {
            config.aps.root_folder_urn = root.clone();
        }
        if let Some(dataset) = &self.dataset {
            config.sync.dataset_path = dataset.display().to_string();
        }
        if let Some(report) = &self.report {
            config.sync.report_path = report.display().to_string();
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_logging(&config.logging);

    info!(version = env!("CARGO_PKG_VERSION"), project = %config.aps.project_id, "Starting attrsync");

    let http = HttpClient::new(&config.http).context("failed to build HTTP client")?;
    let auth = Arc::new(ClientCredentialsAuth::new(&config.aps, http.clone()));
    let aps = Arc::new(ApsClient::new(&config.aps, http, auth));

    let dataset = source_for_path(&config.sync.dataset_path)
        .load()
        .await
        .context("failed to load attribute dataset")?;

    let service = SyncService::new(aps.clone(), aps, Arc::new(AttributeSchema::project_default()))
        .with_options(SyncOptions {
            request_spacing: Duration::from_millis(config.sync.request_spacing_ms),
            dry_run: cli.dry_run,
        });

    let files = service.discover(&config.aps.root_folder_urn).await;
    if files.is_empty() {
        warn!(root = %config.aps.root_folder_urn, "No files found under the root folder");
        return Ok(());
    }

    let will_update = dataset.is_some() && !cli.dry_run;
    if will_update && !cli.yes && !confirm(files.len())? {
        info!("Cancelled; nothing was updated");
        return Ok(());
    }

    let report = service.process(&files, dataset.as_ref()).await;

    sink_for_path(&config.sync.report_path)
        .write(&report)
        .await
        .context("failed to write report")?;

    let summary = report.summary();
    info!(
        success = summary.success,
        failed = summary.failed,
        skipped = summary.skipped,
        report = %config.sync.report_path,
        "Done"
    );

    Ok(())
}

/// Ask on the terminal before touching `count` documents.
fn confirm(count: usize) -> Result<bool> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "Found {count} files. Update attributes now? [y/n] ")?;
    stdout.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
