// ABOUTME: SQL generation and execution for inventory reconciliation
// ABOUTME: Value formatting, statement building and sequential execution

pub mod builder;
pub mod executor;
pub mod value;

pub use builder::{
    get_update_for_sku_batch_record, insertify, make_updates, make_updates_for_table,
    INVENTORY_TABLE,
};
pub use executor::{query_exec, RecordingExecutor, StatementExecutor};
pub use value::{format_json_value, format_sql_value, FormatError, SqlValue};
