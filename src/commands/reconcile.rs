// ABOUTME: Reconciliation commands - deltas, plan, sync (SQL) and push (inventory API)
// ABOUTME: Resolves data source, target and API endpoint from flags, config and saved state

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::ReconcilerConfig;
use crate::data::{DataSource, FixtureFile, StaticFixtures};
use crate::reconcile::{Reconciler, RemoteMode, SyncReport};
use crate::remote::InventoryClient;
use crate::sql::RecordingExecutor;
use crate::state;
use crate::utils::strip_password_from_url;

/// Pick the data source: `--fixtures`, then the config's `fixtures`, then built-ins.
pub async fn load_source(
    config: &ReconcilerConfig,
    fixtures: Option<&Path>,
) -> Result<Box<dyn DataSource>> {
    let path: Option<PathBuf> = fixtures
        .map(Path::to_path_buf)
        .or_else(|| config.fixtures.clone());

    match path {
        Some(path) => {
            tracing::info!("Loading snapshots from {:?}", path);
            Ok(Box::new(FixtureFile::load(&path).await?))
        }
        None => {
            tracing::warn!("No fixture file configured, using built-in development fixtures");
            Ok(Box::new(StaticFixtures))
        }
    }
}

/// Print detected deltas as JSON.
pub async fn deltas(config: &ReconcilerConfig, fixtures: Option<&Path>) -> Result<()> {
    let reconciler = Reconciler::new(load_source(config, fixtures).await?, config);
    let deltas = reconciler.find_deltas().await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&deltas).context("Failed to serialize deltas")?
    );
    Ok(())
}

/// Print the statements a sync would run, inserts first.
pub async fn plan(config: &ReconcilerConfig, fixtures: Option<&Path>) -> Result<()> {
    let reconciler = Reconciler::new(load_source(config, fixtures).await?, config);
    let plan = reconciler.plan().await?;

    if plan.is_empty() {
        println!("-- inventory is already in sync");
    }
    for statement in plan.statements() {
        println!("{};", statement);
    }
    Ok(())
}

/// Apply inserts and updates to the target database.
pub async fn sync(
    config: &ReconcilerConfig,
    fixtures: Option<&Path>,
    target: Option<String>,
    dry_run: bool,
    allow_self_signed_certs: bool,
) -> Result<()> {
    let reconciler = Reconciler::new(load_source(config, fixtures).await?, config);

    if dry_run {
        let executor = RecordingExecutor::default();
        let report = reconciler.manual_sync(&executor).await?;
        for statement in executor.statements() {
            println!("{};", statement);
        }
        print_report(&report);
        return Ok(());
    }

    let target = match target {
        Some(target) => target,
        None => state::load()?.target_url.ok_or_else(|| {
            anyhow::anyhow!(
                "Target database URL not provided and not set in state. \
                 Use `--target` or `inventory-reconciler target set`."
            )
        })?,
    };

    let client = crate::postgres::connect(&target, allow_self_signed_certs)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to target database {}",
                strip_password_from_url(&target).unwrap_or_else(|_| "<target>".to_string())
            )
        })?;

    let report = reconciler.manual_sync(&client).await?;
    print_report(&report);
    Ok(())
}

/// Push new and changed batches to the inventory API.
pub async fn push(
    config: &ReconcilerConfig,
    fixtures: Option<&Path>,
    api_url: Option<String>,
    aggregate: bool,
) -> Result<()> {
    let api_url = match api_url {
        Some(api_url) => api_url,
        None => state::load()
            .context("Failed to load state")?
            .api_url
            .unwrap_or_else(|| config.api_base_url.clone()),
    };

    let client = InventoryClient::new(&api_url, config.request_timeout())?;
    let reconciler = Reconciler::new(load_source(config, fixtures).await?, config);

    let mode = if aggregate {
        RemoteMode::Aggregate
    } else {
        RemoteMode::PerRecord
    };

    tracing::info!("Pushing inventory changes to {}", client.api_base_url());
    let report = reconciler.remote_sync(&client, mode).await?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &SyncReport) {
    println!(
        "Synchronization {}: {} inserts, {} updates ({}ms)",
        report.phase, report.inserts_applied, report.updates_applied, report.duration_ms
    );
}
