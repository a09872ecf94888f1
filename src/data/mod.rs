// ABOUTME: Data access for warehouse metadata and SKU batch snapshots
// ABOUTME: The reconciler reads its inputs only through the DataSource trait

pub mod file;
pub mod fixtures;

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::fmt;

use crate::model::{SkuBatchData, WarehouseMeta};

pub use file::FixtureFile;
pub use fixtures::StaticFixtures;

/// Which side of the reconciliation a snapshot comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotSource {
    /// The application database, the source of truth
    App,
    /// The WMS inventory database
    Inventory,
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotSource::App => f.write_str("app"),
            SnapshotSource::Inventory => f.write_str("inventory"),
        }
    }
}

/// Supplies the reconciler with its read-only inputs.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Warehouses every batch is fanned out to.
    async fn load_warehouse_meta(&self) -> Result<Vec<WarehouseMeta>>;

    /// Full batch records known to one side.
    async fn load_snapshot(&self, source: SnapshotSource) -> Result<Vec<SkuBatchData>>;

    /// Batch ids known to one side, in snapshot order.
    async fn load_sku_batch_ids(&self, source: SnapshotSource) -> Result<Vec<String>> {
        Ok(sku_batch_ids(&self.load_snapshot(source).await?))
    }
}

/// Batch ids of a snapshot, in snapshot order.
pub fn sku_batch_ids(records: &[SkuBatchData]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.sku_batch_id.clone())
        .collect()
}

/// Reject snapshots that repeat a `sku_batch_id`.
pub fn ensure_unique_ids(source: SnapshotSource, records: &[SkuBatchData]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.sku_batch_id.as_str()) {
            bail!(
                "Duplicate sku_batch_id '{}' in {} snapshot",
                record.sku_batch_id,
                source
            );
        }
    }
    Ok(())
}
