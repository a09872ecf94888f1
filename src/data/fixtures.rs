// ABOUTME: Built-in development fixtures for warehouses and SKU batches
// ABOUTME: Four warehouses, six app batches, four of which already exist in inventory

use anyhow::Result;
use async_trait::async_trait;

use super::{DataSource, SnapshotSource};
use crate::model::{SkuBatchData, WarehouseMeta};

/// Static data set used when no fixture file or database is configured.
#[derive(Debug, Clone, Default)]
pub struct StaticFixtures;

impl StaticFixtures {
    pub fn warehouses() -> Vec<WarehouseMeta> {
        [
            ("warehouse-1", 1234),
            ("warehouse-2", 1235),
            ("warehouse-3", 1236),
            ("warehouse-4", 1237),
        ]
        .into_iter()
        .map(|(warehouse_id, wms_id)| WarehouseMeta {
            warehouse_id: warehouse_id.to_string(),
            wms_id,
        })
        .collect()
    }

    pub fn app_sku_batches() -> Vec<SkuBatchData> {
        vec![
            batch("sku-batch-id-1", "sku-id-1", 1234, false, false),
            batch("sku-batch-id-2", "sku-id-1", 1235, false, false),
            batch("sku-batch-id-3", "sku-id-1", 1236, false, false),
            batch("sku-batch-id-4", "sku-id-2", 1237, false, false),
            batch("sku-batch-id-5", "sku-id-2", 1238, false, true),
            batch("sku-batch-id-6", "sku-id-3", 1239, true, false),
        ]
    }

    /// Inventory holds the live (not deleted) app batches it already knows about.
    pub fn inventory_sku_batches() -> Vec<SkuBatchData> {
        const INVENTORY_IDS: [&str; 4] = [
            "sku-batch-id-1",
            "sku-batch-id-2",
            "sku-batch-id-3",
            "sku-batch-id-4",
        ];

        Self::app_sku_batches()
            .into_iter()
            .filter(|record| !record.is_deleted)
            .filter(|record| INVENTORY_IDS.contains(&record.sku_batch_id.as_str()))
            .collect()
    }
}

fn batch(id: &str, sku: &str, wms_id: i64, is_archived: bool, is_deleted: bool) -> SkuBatchData {
    SkuBatchData {
        sku_batch_id: id.to_string(),
        sku_id: Some(sku.to_string()),
        wms_id: Some(wms_id),
        quantity_per_unit_of_measure: 1.0,
        is_archived,
        is_deleted,
    }
}

#[async_trait]
impl DataSource for StaticFixtures {
    async fn load_warehouse_meta(&self) -> Result<Vec<WarehouseMeta>> {
        Ok(Self::warehouses())
    }

    async fn load_snapshot(&self, source: SnapshotSource) -> Result<Vec<SkuBatchData>> {
        Ok(match source {
            SnapshotSource::App => Self::app_sku_batches(),
            SnapshotSource::Inventory => Self::inventory_sku_batches(),
        })
    }
}
