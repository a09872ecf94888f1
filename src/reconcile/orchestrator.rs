// ABOUTME: Reconciliation orchestrator - detect, build, then apply inventory mutations
// ABOUTME: Applies SQL through a StatementExecutor or records through the inventory API

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use super::deltas::find_deltas;
use super::inserts::{find_new_sku_batch_ids, sku_batch_to_inserts, NewRecordResolver};
use super::warehouse::make_warehouse_records_for_sku_batch_record;
use crate::config::ReconcilerConfig;
use crate::data::{sku_batch_ids, DataSource, SnapshotSource};
use crate::model::{InventoryRecord, SkuBatchData, SkuBatchUpdate, WarehouseMeta};
use crate::remote::InventoryGateway;
use crate::sql::{make_updates_for_table, query_exec, StatementExecutor};

/// Phase of a single reconciliation run. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    Detect,
    Build,
    Apply,
    Completed,
    Failed,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncPhase::Detect => "detect",
            SyncPhase::Build => "build",
            SyncPhase::Apply => "apply",
            SyncPhase::Completed => "completed",
            SyncPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// How records are pushed to the inventory API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemoteMode {
    /// One call per warehouse record
    #[default]
    PerRecord,
    /// One aggregate call per batch, covering every warehouse
    Aggregate,
}

/// Statements produced by the detect and build phases.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncPlan {
    pub inserts: Vec<String>,
    pub updates: Vec<String>,
}

impl SyncPlan {
    /// Inserts first, then updates.
    pub fn statements(&self) -> Vec<String> {
        self.inserts
            .iter()
            .chain(self.updates.iter())
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.updates.is_empty()
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub phase: SyncPhase,
    /// Insert statements executed or create calls made
    pub inserts_applied: usize,
    /// Update statements executed or update calls made
    pub updates_applied: usize,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub duration_ms: u64,
}

/// Tracks phase transitions of one run.
struct SyncRun {
    phase: SyncPhase,
    started_at: chrono::DateTime<chrono::Utc>,
    start: Instant,
}

impl SyncRun {
    fn start() -> Self {
        Self {
            phase: SyncPhase::Detect,
            started_at: chrono::Utc::now(),
            start: Instant::now(),
        }
    }

    fn enter(&mut self, phase: SyncPhase) {
        debug_assert!(phase as u8 > self.phase as u8 || phase == self.phase);
        tracing::debug!("Sync phase {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    fn complete(mut self, inserts_applied: usize, updates_applied: usize) -> SyncReport {
        self.enter(SyncPhase::Completed);
        SyncReport {
            phase: self.phase,
            inserts_applied,
            updates_applied,
            started_at: self.started_at,
            duration_ms: self.start.elapsed().as_millis() as u64,
        }
    }
}

/// Snapshots read once per run and the changes derived from them.
struct Detection {
    app: Vec<SkuBatchData>,
    inventory: Vec<SkuBatchData>,
    new_ids: Vec<String>,
    deltas: Vec<SkuBatchUpdate>,
}

/// Reconciles the app snapshot into inventory.
///
/// Inputs come from a [`DataSource`]; attributes of brand-new batches come from
/// a [`NewRecordResolver`]. A run goes detect → build → apply and stops at the
/// first failure.
pub struct Reconciler {
    source: Box<dyn DataSource>,
    resolver: Box<dyn NewRecordResolver>,
    inventory_table: String,
}

impl Reconciler {
    /// Create a reconciler using the config's table and placeholder resolver.
    pub fn new(source: Box<dyn DataSource>, config: &ReconcilerConfig) -> Self {
        Self {
            source,
            resolver: Box::new(config.placeholder_resolver()),
            inventory_table: config.inventory_table.clone(),
        }
    }

    /// Replace the new-record attribute resolver.
    pub fn with_resolver(mut self, resolver: Box<dyn NewRecordResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Batch ids the app knows about that inventory does not.
    pub async fn find_new_sku_batch_ids(&self) -> Result<Vec<String>> {
        let app_ids = self.source.load_sku_batch_ids(SnapshotSource::App).await?;
        let inventory_ids = self
            .source
            .load_sku_batch_ids(SnapshotSource::Inventory)
            .await?;

        let new_ids = find_new_sku_batch_ids(&app_ids, &inventory_ids);
        tracing::info!("Found {} new SKU batches to insert", new_ids.len());
        Ok(new_ids)
    }

    /// Field-level deltas between the app and inventory snapshots.
    pub async fn find_deltas(&self) -> Result<Vec<SkuBatchUpdate>> {
        let app = self.source.load_snapshot(SnapshotSource::App).await?;
        let inventory = self.source.load_snapshot(SnapshotSource::Inventory).await?;

        let deltas = find_deltas(&app, &inventory);
        tracing::info!("Found {} SKU batches with changes", deltas.len());
        Ok(deltas)
    }

    /// INSERT statements for the given new batch ids.
    pub async fn sku_batch_to_inserts(&self, sku_batch_ids: &[String]) -> Result<Vec<String>> {
        sku_batch_to_inserts(&self.inventory_table, sku_batch_ids, self.resolver.as_ref()).await
    }

    /// UPDATE statements for every field that differs between the snapshots.
    pub async fn find_changes_between_datasets(&self) -> Result<Vec<String>> {
        let deltas = self.find_deltas().await?;
        Ok(self.updates_for(&deltas))
    }

    /// Run detect and build without applying anything.
    pub async fn plan(&self) -> Result<SyncPlan> {
        let detection = self.detect().await?;
        self.build(&detection).await
    }

    /// Apply inserts, then updates, through `executor`.
    ///
    /// Execution stops at the first failing statement; the error is logged and
    /// returned and the remaining statements are not run.
    pub async fn manual_sync<E>(&self, executor: &E) -> Result<SyncReport>
    where
        E: StatementExecutor + ?Sized,
    {
        tracing::info!("Starting synchronization process");
        let mut run = SyncRun::start();

        let result = self.run_manual(executor, &mut run).await;
        self.finish(run, result)
    }

    async fn run_manual<E>(&self, executor: &E, run: &mut SyncRun) -> Result<(usize, usize)>
    where
        E: StatementExecutor + ?Sized,
    {
        run.enter(SyncPhase::Detect);
        let detection = self.detect().await?;

        run.enter(SyncPhase::Build);
        let plan = self.build(&detection).await?;

        run.enter(SyncPhase::Apply);
        query_exec(executor, &plan.statements()).await?;
        tracing::info!(
            "Applied {} insert and {} update statements",
            plan.inserts.len(),
            plan.updates.len()
        );

        Ok((plan.inserts.len(), plan.updates.len()))
    }

    /// Push new and changed batches to the inventory API.
    ///
    /// New batches are created from their app record; changed batches are
    /// updated with the inventory-side record, matching the values reported
    /// in each delta. Every batch is fanned out to all warehouses.
    pub async fn remote_sync<G>(&self, gateway: &G, mode: RemoteMode) -> Result<SyncReport>
    where
        G: InventoryGateway + ?Sized,
    {
        tracing::info!("Starting synchronization process");
        let mut run = SyncRun::start();

        let result = self.run_remote(gateway, mode, &mut run).await;
        self.finish(run, result)
    }

    async fn run_remote<G>(
        &self,
        gateway: &G,
        mode: RemoteMode,
        run: &mut SyncRun,
    ) -> Result<(usize, usize)>
    where
        G: InventoryGateway + ?Sized,
    {
        run.enter(SyncPhase::Detect);
        let detection = self.detect().await?;
        let warehouses = self.source.load_warehouse_meta().await?;

        run.enter(SyncPhase::Build);
        let creates = fan_out(&detection.new_ids, &detection.app, &warehouses)?;
        let changed_ids: Vec<String> = detection
            .deltas
            .iter()
            .map(|delta| delta.sku_batch_id.clone())
            .collect();
        let updates = fan_out(&changed_ids, &detection.inventory, &warehouses)?;

        run.enter(SyncPhase::Apply);
        let mut created = 0;
        for records in creates.iter().filter(|records| !records.is_empty()) {
            created += match mode {
                RemoteMode::PerRecord => {
                    for record in records {
                        gateway.post_inventory(record).await?;
                    }
                    records.len()
                }
                RemoteMode::Aggregate => {
                    gateway.post_inventory_aggregate(records).await?;
                    1
                }
            };
        }

        let mut updated = 0;
        for records in updates.iter().filter(|records| !records.is_empty()) {
            updated += match mode {
                RemoteMode::PerRecord => {
                    for record in records {
                        gateway.put_inventory(record).await?;
                    }
                    records.len()
                }
                RemoteMode::Aggregate => {
                    gateway.put_inventory_aggregate(records).await?;
                    1
                }
            };
        }

        Ok((created, updated))
    }

    /// Read each snapshot once and derive new ids and deltas from that read.
    async fn detect(&self) -> Result<Detection> {
        let app = self.source.load_snapshot(SnapshotSource::App).await?;
        let inventory = self.source.load_snapshot(SnapshotSource::Inventory).await?;

        let new_ids = find_new_sku_batch_ids(&sku_batch_ids(&app), &sku_batch_ids(&inventory));
        tracing::info!("Found {} new SKU batches to insert", new_ids.len());
        let deltas = find_deltas(&app, &inventory);
        tracing::info!("Found {} SKU batches with changes", deltas.len());

        Ok(Detection {
            app,
            inventory,
            new_ids,
            deltas,
        })
    }

    async fn build(&self, detection: &Detection) -> Result<SyncPlan> {
        let inserts = self.sku_batch_to_inserts(&detection.new_ids).await?;
        let updates = self.updates_for(&detection.deltas);
        Ok(SyncPlan { inserts, updates })
    }

    fn updates_for(&self, deltas: &[SkuBatchUpdate]) -> Vec<String> {
        deltas
            .iter()
            .flat_map(|delta| make_updates_for_table(&self.inventory_table, delta))
            .collect()
    }

    fn finish(&self, mut run: SyncRun, result: Result<(usize, usize)>) -> Result<SyncReport> {
        match result {
            Ok((inserts, updates)) => {
                let report = run.complete(inserts, updates);
                tracing::info!(
                    "Synchronization process completed successfully ({} inserts, {} updates in {}ms)",
                    report.inserts_applied,
                    report.updates_applied,
                    report.duration_ms
                );
                Ok(report)
            }
            Err(e) => {
                let failed_in = run.phase;
                run.enter(SyncPhase::Failed);
                tracing::error!("Error during synchronization (phase {}): {:?}", failed_in, e);
                Err(e)
            }
        }
    }
}

/// Warehouse records per batch id. Every id must have a record in `records`.
fn fan_out(
    sku_batch_ids: &[String],
    records: &[SkuBatchData],
    warehouses: &[WarehouseMeta],
) -> Result<Vec<Vec<InventoryRecord>>> {
    let mut by_id: HashMap<&str, &SkuBatchData> = HashMap::with_capacity(records.len());
    for record in records {
        by_id.entry(record.sku_batch_id.as_str()).or_insert(record);
    }

    sku_batch_ids
        .iter()
        .map(|id| {
            by_id
                .get(id.as_str())
                .map(|record| make_warehouse_records_for_sku_batch_record(record, warehouses))
                .ok_or_else(|| anyhow!("No record found for SKU batch {}", id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StaticFixtures;
    use crate::sql::RecordingExecutor;

    fn fixtures_reconciler() -> Reconciler {
        Reconciler::new(Box::new(StaticFixtures), &ReconcilerConfig::default())
    }

    #[tokio::test]
    async fn test_find_new_sku_batch_ids_from_fixtures() {
        let ids = fixtures_reconciler().find_new_sku_batch_ids().await.unwrap();
        assert_eq!(ids, vec!["sku-batch-id-5", "sku-batch-id-6"]);
    }

    #[tokio::test]
    async fn test_fixtures_have_no_field_changes() {
        let updates = fixtures_reconciler()
            .find_changes_between_datasets()
            .await
            .unwrap();
        assert!(updates.is_empty());
    }

    #[tokio::test]
    async fn test_plan_from_fixtures() {
        let plan = fixtures_reconciler().plan().await.unwrap();
        assert_eq!(
            plan.inserts,
            vec![
                "INSERT INTO inventory (sku_batch_id, sku_id, quantity) VALUES ('sku-batch-id-5', 'sku_id_sku-batch-id-5', 100)",
                "INSERT INTO inventory (sku_batch_id, sku_id, quantity) VALUES ('sku-batch-id-6', 'sku_id_sku-batch-id-6', 100)",
            ]
        );
        assert!(plan.updates.is_empty());
        assert_eq!(plan.statements().len(), 2);
    }

    #[tokio::test]
    async fn test_manual_sync_records_statements() {
        let executor = RecordingExecutor::default();
        let report = fixtures_reconciler().manual_sync(&executor).await.unwrap();

        assert_eq!(report.phase, SyncPhase::Completed);
        assert_eq!(report.inserts_applied, 2);
        assert_eq!(report.updates_applied, 0);
        assert_eq!(executor.statements().len(), 2);
    }

    #[test]
    fn test_fan_out_covers_every_warehouse() {
        let ids = vec!["sku-batch-id-1".to_string()];
        let batches = fan_out(
            &ids,
            &StaticFixtures::app_sku_batches(),
            &StaticFixtures::warehouses(),
        )
        .unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 4);
    }

    #[test]
    fn test_fan_out_rejects_unknown_ids() {
        let ids = vec!["sku-batch-id-1".to_string(), "unknown".to_string()];
        let err = fan_out(
            &ids,
            &StaticFixtures::app_sku_batches(),
            &StaticFixtures::warehouses(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "No record found for SKU batch unknown");
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(SyncPhase::Apply.to_string(), "apply");
        assert_eq!(SyncPhase::Failed.to_string(), "failed");
    }
}
