// ABOUTME: Record types shared by the delta detector, statement builder and gateway
// ABOUTME: Field names serialize in camelCase to match the app and inventory APIs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sql::SqlValue;

/// Numeric identifier of a warehouse management system.
pub type WmsId = i64;

/// One SKU batch as known by a single data source.
///
/// `sku_id` of `None` and `Some("")` are the same "unset" state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuBatchData {
    pub sku_batch_id: String,
    #[serde(default)]
    pub sku_id: Option<String>,
    #[serde(default)]
    pub wms_id: Option<WmsId>,
    pub quantity_per_unit_of_measure: f64,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_deleted: bool,
}

impl SkuBatchData {
    /// Read a single comparable field as an SQL scalar.
    pub fn value_of(&self, field: SkuBatchField) -> SqlValue {
        match field {
            SkuBatchField::SkuId => match &self.sku_id {
                Some(id) => SqlValue::Text(id.clone()),
                None => SqlValue::Null,
            },
            SkuBatchField::WmsId => match self.wms_id {
                Some(id) => SqlValue::Int(id),
                None => SqlValue::Null,
            },
            SkuBatchField::QuantityPerUnitOfMeasure => {
                SqlValue::from(self.quantity_per_unit_of_measure)
            }
            SkuBatchField::IsArchived => SqlValue::Bool(self.is_archived),
            SkuBatchField::IsDeleted => SqlValue::Bool(self.is_deleted),
        }
    }

    /// `sku_id` with the empty string folded into `None`.
    pub fn normalized_sku_id(&self) -> Option<&str> {
        self.sku_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Fields compared between two representations of the same batch.
///
/// `sku_batch_id` is the identity key and is never reported as a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkuBatchField {
    SkuId,
    WmsId,
    QuantityPerUnitOfMeasure,
    IsArchived,
    IsDeleted,
}

impl SkuBatchField {
    /// Comparison order, which is also the order changes are reported in.
    pub const ALL: [SkuBatchField; 5] = [
        SkuBatchField::SkuId,
        SkuBatchField::WmsId,
        SkuBatchField::QuantityPerUnitOfMeasure,
        SkuBatchField::IsArchived,
        SkuBatchField::IsDeleted,
    ];

    /// Column name used in generated UPDATE statements.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkuBatchField::SkuId => "skuId",
            SkuBatchField::WmsId => "wmsId",
            SkuBatchField::QuantityPerUnitOfMeasure => "quantityPerUnitOfMeasure",
            SkuBatchField::IsArchived => "isArchived",
            SkuBatchField::IsDeleted => "isDeleted",
        }
    }
}

impl fmt::Display for SkuBatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field change, always carrying the inventory-side value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdate {
    pub field: SkuBatchField,
    pub new_value: SqlValue,
}

/// All field changes detected for one batch.
///
/// Never constructed with an empty `updates` list by the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuBatchUpdate {
    pub sku_batch_id: String,
    pub updates: Vec<InventoryUpdate>,
}

/// Static warehouse reference data, loaded once per process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseMeta {
    pub warehouse_id: String,
    pub wms_id: WmsId,
}

/// A batch record targeted at one warehouse, as sent to the inventory API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub sku_batch_id: String,
    pub sku_id: String,
    pub wms_id: WmsId,
    pub quantity_per_unit_of_measure: f64,
    pub is_archived: bool,
    pub is_deleted: bool,
    pub warehouse_id: String,
}

impl InventoryRecord {
    /// Column/value pairs in declaration order, for `insertify`.
    pub fn to_insert_row(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("skuBatchId", SqlValue::Text(self.sku_batch_id.clone())),
            ("skuId", SqlValue::Text(self.sku_id.clone())),
            ("wmsId", SqlValue::Int(self.wms_id)),
            (
                "quantityPerUnitOfMeasure",
                SqlValue::from(self.quantity_per_unit_of_measure),
            ),
            ("isArchived", SqlValue::Bool(self.is_archived)),
            ("isDeleted", SqlValue::Bool(self.is_deleted)),
            ("warehouseId", SqlValue::Text(self.warehouse_id.clone())),
        ]
    }
}
