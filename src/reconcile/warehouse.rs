// ABOUTME: Fans a single SKU batch out into one inventory record per warehouse

use crate::model::{InventoryRecord, SkuBatchData, WarehouseMeta};

/// Build one inventory record per warehouse for `record`.
///
/// An unset sku id becomes `""` and an unset wms id becomes `0`.
pub fn make_warehouse_records_for_sku_batch_record(
    record: &SkuBatchData,
    warehouses: &[WarehouseMeta],
) -> Vec<InventoryRecord> {
    warehouses
        .iter()
        .map(|warehouse| InventoryRecord {
            sku_batch_id: record.sku_batch_id.clone(),
            sku_id: record.sku_id.clone().unwrap_or_default(),
            wms_id: record.wms_id.unwrap_or(0),
            quantity_per_unit_of_measure: record.quantity_per_unit_of_measure,
            is_archived: record.is_archived,
            is_deleted: record.is_deleted,
            warehouse_id: warehouse.warehouse_id.clone(),
        })
        .collect()
}
