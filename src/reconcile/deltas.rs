// ABOUTME: Field-level delta detection between app and inventory snapshots
// ABOUTME: Matches records by sku_batch_id and reports inventory-side values for differing fields

use std::collections::HashMap;

use crate::model::{InventoryUpdate, SkuBatchData, SkuBatchField, SkuBatchUpdate};

/// Find the field changes between the app snapshot and the inventory snapshot.
///
/// For each app record, the inventory record with the same `sku_batch_id` is
/// located (the first one wins if the inventory snapshot repeats an id). App
/// records without an inventory counterpart are skipped: new batches go through
/// the insert path instead.
///
/// Each reported change carries the value from `inventory_data`, the second
/// argument. Deltas come out in `app_data` order, one per record with at least
/// one differing field.
///
/// `sku_id` values of `None` and `""` are considered equal; any other
/// difference, including `""` against a real id, is a change.
///
/// # Examples
///
/// ```
/// # use inventory_reconciler::model::SkuBatchData;
/// # use inventory_reconciler::find_deltas;
/// let app = vec![SkuBatchData {
///     sku_batch_id: "1".into(),
///     sku_id: Some("1".into()),
///     wms_id: Some(1),
///     quantity_per_unit_of_measure: 5.0,
///     is_archived: false,
///     is_deleted: false,
/// }];
/// let mut inventory = app.clone();
/// inventory[0].quantity_per_unit_of_measure = 10.0;
///
/// let deltas = find_deltas(&app, &inventory);
/// assert_eq!(deltas.len(), 1);
/// assert_eq!(deltas[0].updates[0].field.as_str(), "quantityPerUnitOfMeasure");
/// ```
pub fn find_deltas(app_data: &[SkuBatchData], inventory_data: &[SkuBatchData]) -> Vec<SkuBatchUpdate> {
    let mut inventory_by_id: HashMap<&str, &SkuBatchData> = HashMap::with_capacity(inventory_data.len());
    for record in inventory_data {
        inventory_by_id
            .entry(record.sku_batch_id.as_str())
            .or_insert(record);
    }

    let deltas: Vec<SkuBatchUpdate> = app_data
        .iter()
        .filter_map(|app_record| {
            let inventory_record = inventory_by_id.get(app_record.sku_batch_id.as_str())?;
            diff_record(app_record, inventory_record)
        })
        .collect();

    tracing::debug!(
        "Compared {} app records against {} inventory records, {} with changes",
        app_data.len(),
        inventory_data.len(),
        deltas.len()
    );

    deltas
}

/// Compare a matched pair, returning `None` when every field is equal.
fn diff_record(app: &SkuBatchData, inventory: &SkuBatchData) -> Option<SkuBatchUpdate> {
    let updates: Vec<InventoryUpdate> = SkuBatchField::ALL
        .iter()
        .copied()
        .filter(|field| !field_matches(app, inventory, *field))
        .map(|field| InventoryUpdate {
            field,
            new_value: inventory.value_of(field),
        })
        .collect();

    if updates.is_empty() {
        return None;
    }

    Some(SkuBatchUpdate {
        sku_batch_id: app.sku_batch_id.clone(),
        updates,
    })
}

fn field_matches(app: &SkuBatchData, inventory: &SkuBatchData, field: SkuBatchField) -> bool {
    match field {
        SkuBatchField::SkuId => app.normalized_sku_id() == inventory.normalized_sku_id(),
        _ => app.value_of(field) == inventory.value_of(field),
    }
}
