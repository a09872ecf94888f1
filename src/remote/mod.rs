// ABOUTME: Remote inventory API gateway
// ABOUTME: Pushes created and updated inventory records over HTTP

pub mod client;
pub mod models;

pub use client::{InventoryClient, InventoryGateway};
pub use models::{GatewayError, InventoryResource, Mutation, DEFAULT_API_BASE_URL};
