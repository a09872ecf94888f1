// ABOUTME: Library root for inventory-reconciler
// ABOUTME: Exposes delta detection, SQL generation, execution and the inventory API gateway

pub mod commands;
pub mod config;
pub mod data;
pub mod model;
pub mod postgres;
pub mod reconcile;
pub mod remote;
pub mod sql;
pub mod state;
pub mod utils;

pub use config::ReconcilerConfig;
pub use data::{DataSource, FixtureFile, SnapshotSource, StaticFixtures};
pub use model::{
    InventoryRecord, InventoryUpdate, SkuBatchData, SkuBatchField, SkuBatchUpdate, WarehouseMeta,
};
pub use reconcile::{find_deltas, Reconciler, SyncPhase, SyncReport};
pub use remote::{InventoryClient, InventoryGateway};
pub use sql::{format_sql_value, query_exec, SqlValue, StatementExecutor};
