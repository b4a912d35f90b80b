//! Sync command - mirror the remote model list into manifest files

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::catalog::FsManifestRepository;
use crate::infrastructure::services::{CatalogSyncService, SyncOptions, SyncReport};

/// Arguments for the sync command
#[derive(Args, Clone)]
pub struct SyncArgs {
    /// Manifest directory (overrides config)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

/// Run a catalog sync
pub async fn run(config: AppConfig, args: SyncArgs) -> anyhow::Result<()> {
    let dir = args.dir.unwrap_or_else(|| config.catalog.models_dir.clone());
    info!(dir = %dir.display(), dry_run = args.dry_run, "Starting catalog sync");

    let client = super::catalog_client(&config).await?;
    let repository = FsManifestRepository::new(dir);
    let service = CatalogSyncService::new(
        Arc::new(client),
        Arc::new(repository),
        config.catalog.currency.clone(),
    );

    let report = service
        .sync(SyncOptions {
            dry_run: args.dry_run,
        })
        .await?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &SyncReport) {
    let prefix = if report.dry_run { "[dry run] " } else { "" };

    for file in &report.created {
        println!("{}created {}", prefix, file);
    }

    for updated in &report.updated {
        println!("{}updated {}:", prefix, updated.file_name);
        for change in &updated.changes {
            println!("  - {}", change);
        }
    }

    for file in &report.deleted {
        println!("{}deleted {} (model no longer exists)", prefix, file);
    }

    println!(
        "{}{} created, {} updated, {} unchanged, {} deleted",
        prefix,
        report.created.len(),
        report.updated.len(),
        report.unchanged.len(),
        report.deleted.len()
    );
}
