// ABOUTME: Command implementations for the CLI
// ABOUTME: Exports reconciliation commands and target management

pub mod reconcile;
pub mod target;

pub use reconcile::{deltas, plan, push, sync};
