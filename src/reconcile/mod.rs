// ABOUTME: Reconciliation engine - delta detection, insert planning and orchestration
// ABOUTME: Turns app vs inventory differences into ordered SQL or API mutations

pub mod deltas;
pub mod inserts;
pub mod orchestrator;
pub mod warehouse;

pub use deltas::find_deltas;
pub use inserts::{
    find_new_sku_batch_ids, sku_batch_to_inserts, NewBatchAttributes, NewRecordResolver,
    PlaceholderResolver,
};
pub use orchestrator::{Reconciler, RemoteMode, SyncPhase, SyncPlan, SyncReport};
pub use warehouse::make_warehouse_records_for_sku_batch_record;
