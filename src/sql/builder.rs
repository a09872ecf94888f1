// ABOUTME: Builds INSERT and UPDATE statement text for inventory records
// ABOUTME: Update-from-delta emits one statement per changed field

use super::value::{format_sql_value, SqlValue};
use crate::model::SkuBatchUpdate;
use crate::utils::quote_literal;

/// Table targeted by update-from-delta statements.
pub const INVENTORY_TABLE: &str = "inventory";

/// Build an INSERT statement from ordered column/value pairs.
///
/// Every non-NULL value is coerced to text and quoted, so numbers and booleans
/// become `'101'` and `'true'`. This is intentionally not the typed rendering of
/// [`format_sql_value`]; the two forms are not interchangeable. NULL stays a
/// bare `NULL`.
///
/// # Examples
///
/// ```
/// use inventory_reconciler::sql::{insertify, SqlValue};
/// let sql = insertify("t", &[("a", SqlValue::Int(1)), ("b", SqlValue::from("x'y"))]);
/// assert_eq!(sql, "INSERT INTO t (a, b) VALUES ('1', 'x''y')");
/// ```
pub fn insertify<C: AsRef<str>>(table: &str, row: &[(C, SqlValue)]) -> String {
    let columns = row
        .iter()
        .map(|(column, _)| column.as_ref())
        .collect::<Vec<_>>()
        .join(", ");
    let values = row
        .iter()
        .map(|(_, value)| match value.as_text() {
            Some(text) => quote_literal(&text),
            None => "NULL".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!("INSERT INTO {} ({}) VALUES ({})", table, columns, values)
}

/// Build an UPDATE statement for a single SKU batch.
///
/// `updates` is a pre-rendered SET fragment and is used verbatim; callers are
/// responsible for building each assignment safely. The batch id is escaped
/// like a string literal.
pub fn get_update_for_sku_batch_record(table: &str, updates: &str, sku_batch_id: &str) -> String {
    format!(
        "UPDATE {} SET {} WHERE sku_batch_id = {}",
        table,
        updates,
        quote_literal(sku_batch_id)
    )
}

/// Build one UPDATE statement per field change in `delta`, in change order.
pub fn make_updates(delta: &SkuBatchUpdate) -> Vec<String> {
    make_updates_for_table(INVENTORY_TABLE, delta)
}

/// Same as [`make_updates`] against a configurable table.
pub fn make_updates_for_table(table: &str, delta: &SkuBatchUpdate) -> Vec<String> {
    delta
        .updates
        .iter()
        .map(|update| {
            let assignment = format!(
                "{} = {}",
                update.field.as_str(),
                format_sql_value(&update.new_value)
            );
            get_update_for_sku_batch_record(table, &assignment, &delta.sku_batch_id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InventoryRecord, InventoryUpdate, SkuBatchField};

    #[test]
    fn test_insertify_quotes_every_value() {
        let row = vec![
            ("wmsId", SqlValue::Int(101)),
            ("skuBatchId", SqlValue::from("sku123")),
            ("warehouseId", SqlValue::from("warehouse456")),
            ("skuId", SqlValue::from("sku789")),
            ("quantityPerUnitOfMeasure", SqlValue::Int(1000)),
        ];

        assert_eq!(
            insertify("test_table", &row),
            "INSERT INTO test_table (wmsId, skuBatchId, warehouseId, skuId, quantityPerUnitOfMeasure) \
             VALUES ('101', 'sku123', 'warehouse456', 'sku789', '1000')"
        );
    }

    #[test]
    fn test_insertify_escapes_and_handles_null() {
        let row = vec![
            ("name", SqlValue::from("O'Reilly")),
            ("flag", SqlValue::Bool(true)),
            ("missing", SqlValue::Null),
        ];
        assert_eq!(
            insertify("t", &row),
            "INSERT INTO t (name, flag, missing) VALUES ('O''Reilly', 'true', NULL)"
        );
    }

    #[test]
    fn test_insertify_inventory_record() {
        let record = InventoryRecord {
            sku_batch_id: "b-1".to_string(),
            sku_id: "s-1".to_string(),
            wms_id: 1234,
            quantity_per_unit_of_measure: 2.0,
            is_archived: false,
            is_deleted: false,
            warehouse_id: "warehouse-1".to_string(),
        };
        assert_eq!(
            insertify("inventory", &record.to_insert_row()),
            "INSERT INTO inventory (skuBatchId, skuId, wmsId, quantityPerUnitOfMeasure, isArchived, isDeleted, warehouseId) \
             VALUES ('b-1', 's-1', '1234', '2', 'false', 'false', 'warehouse-1')"
        );
    }

    #[test]
    fn test_update_for_sku_batch_record() {
        assert_eq!(
            get_update_for_sku_batch_record("table", "name = \"New Name\"", "1"),
            "UPDATE table SET name = \"New Name\" WHERE sku_batch_id = '1'"
        );
    }

    #[test]
    fn test_update_for_sku_batch_record_escapes_id() {
        assert_eq!(
            get_update_for_sku_batch_record("t", "x = 1", "O'Brien"),
            "UPDATE t SET x = 1 WHERE sku_batch_id = 'O''Brien'"
        );
    }

    #[test]
    fn test_make_updates_one_statement_per_change() {
        let delta = SkuBatchUpdate {
            sku_batch_id: "1".to_string(),
            updates: vec![
                InventoryUpdate {
                    field: SkuBatchField::QuantityPerUnitOfMeasure,
                    new_value: SqlValue::Int(10),
                },
                InventoryUpdate {
                    field: SkuBatchField::IsArchived,
                    new_value: SqlValue::Bool(true),
                },
            ],
        };

        let updates = make_updates(&delta);
        assert_eq!(updates.len(), 2);
        assert_eq!(
            updates[0],
            "UPDATE inventory SET quantityPerUnitOfMeasure = 10 WHERE sku_batch_id = '1'"
        );
        assert_eq!(
            updates[1],
            "UPDATE inventory SET isArchived = true WHERE sku_batch_id = '1'"
        );
    }

    #[test]
    fn test_make_updates_formats_strings_and_null() {
        let delta = SkuBatchUpdate {
            sku_batch_id: "b'1".to_string(),
            updates: vec![
                InventoryUpdate {
                    field: SkuBatchField::SkuId,
                    new_value: SqlValue::from("it's"),
                },
                InventoryUpdate {
                    field: SkuBatchField::WmsId,
                    new_value: SqlValue::Null,
                },
            ],
        };

        assert_eq!(
            make_updates_for_table("inv", &delta),
            vec![
                "UPDATE inv SET skuId = 'it''s' WHERE sku_batch_id = 'b''1'".to_string(),
                "UPDATE inv SET wmsId = NULL WHERE sku_batch_id = 'b''1'".to_string(),
            ]
        );
    }
}
