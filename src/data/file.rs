// ABOUTME: JSON fixture file data source
// ABOUTME: Loads warehouses and both snapshots from one file, rejecting duplicate batch ids

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use super::{ensure_unique_ids, DataSource, SnapshotSource};
use crate::model::{SkuBatchData, WarehouseMeta};

/// Snapshot data read from a JSON file.
///
/// ```json
/// {
///   "warehouses": [{ "warehouseId": "warehouse-1", "wmsId": 1234 }],
///   "app": [{ "skuBatchId": "b-1", "skuId": "s-1", "wmsId": 1234,
///             "quantityPerUnitOfMeasure": 1, "isArchived": false, "isDeleted": false }],
///   "inventory": []
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureFile {
    #[serde(default)]
    pub warehouses: Vec<WarehouseMeta>,
    #[serde(default)]
    pub app: Vec<SkuBatchData>,
    #[serde(default)]
    pub inventory: Vec<SkuBatchData>,
}

impl FixtureFile {
    /// Load and validate a fixture file
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read fixture file {:?}", path))?;
        Self::from_json(&contents).with_context(|| format!("Invalid fixture file {:?}", path))
    }

    /// Parse and validate fixture JSON
    pub fn from_json(contents: &str) -> Result<Self> {
        let fixtures: FixtureFile =
            serde_json::from_str(contents).context("Failed to parse fixture JSON")?;

        ensure_unique_ids(SnapshotSource::App, &fixtures.app)?;
        ensure_unique_ids(SnapshotSource::Inventory, &fixtures.inventory)?;

        tracing::debug!(
            "Loaded fixtures: {} warehouses, {} app records, {} inventory records",
            fixtures.warehouses.len(),
            fixtures.app.len(),
            fixtures.inventory.len()
        );

        Ok(fixtures)
    }
}

#[async_trait]
impl DataSource for FixtureFile {
    async fn load_warehouse_meta(&self) -> Result<Vec<WarehouseMeta>> {
        Ok(self.warehouses.clone())
    }

    async fn load_snapshot(&self, source: SnapshotSource) -> Result<Vec<SkuBatchData>> {
        Ok(match source {
            SnapshotSource::App => self.app.clone(),
            SnapshotSource::Inventory => self.inventory.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIXTURE: &str = r#"{
        "warehouses": [{ "warehouseId": "w-1", "wmsId": 1 }],
        "app": [
            { "skuBatchId": "b-1", "skuId": "s-1", "wmsId": 1, "quantityPerUnitOfMeasure": 5,
              "isArchived": false, "isDeleted": false },
            { "skuBatchId": "b-2", "skuId": null, "wmsId": null, "quantityPerUnitOfMeasure": 1,
              "isArchived": false, "isDeleted": false }
        ],
        "inventory": [
            { "skuBatchId": "b-1", "skuId": "s-1", "wmsId": 1, "quantityPerUnitOfMeasure": 10,
              "isArchived": false, "isDeleted": false }
        ]
    }"#;

    #[tokio::test]
    async fn test_load_fixture_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let fixtures = FixtureFile::load(file.path()).await.unwrap();
        assert_eq!(fixtures.warehouses.len(), 1);
        assert_eq!(
            fixtures
                .load_sku_batch_ids(SnapshotSource::App)
                .await
                .unwrap(),
            vec!["b-1", "b-2"]
        );
        assert_eq!(fixtures.inventory[0].quantity_per_unit_of_measure, 10.0);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"{
            "inventory": [
                { "skuBatchId": "b-1", "quantityPerUnitOfMeasure": 1 },
                { "skuBatchId": "b-1", "quantityPerUnitOfMeasure": 2 }
            ]
        }"#;
        let err = FixtureFile::from_json(json).unwrap_err();
        assert!(err.to_string().contains("Duplicate sku_batch_id 'b-1'"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = FixtureFile::load(Path::new("/nonexistent/fixtures.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read fixture file"));
    }
}
