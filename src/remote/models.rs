// ABOUTME: Endpoint and error types for the remote inventory API
// ABOUTME: POST creates and PUT updates on /inventory and /inventory-aggregate

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Default base URL of the inventory service.
pub const DEFAULT_API_BASE_URL: &str = "https://local-inventory.nabis.dev/v1";

/// Sub-resource of the inventory API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryResource {
    /// One record per call
    Inventory,
    /// Records for several warehouses in one call
    InventoryAggregate,
}

impl InventoryResource {
    pub fn path(&self) -> &'static str {
        match self {
            InventoryResource::Inventory => "inventory",
            InventoryResource::InventoryAggregate => "inventory-aggregate",
        }
    }
}

/// Kind of remote mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
}

impl Mutation {
    pub fn method(&self) -> Method {
        match self {
            Mutation::Create => Method::POST,
            Mutation::Update => Method::PUT,
        }
    }

    /// Message logged when the call fails.
    pub fn failure_message(&self, resource: InventoryResource) -> &'static str {
        match (self, resource) {
            (Mutation::Create, InventoryResource::Inventory) => "Failed to post inventory",
            (Mutation::Update, InventoryResource::Inventory) => "Failed to update inventory",
            (Mutation::Create, InventoryResource::InventoryAggregate) => {
                "Failed to post inventory aggregate"
            }
            (Mutation::Update, InventoryResource::InventoryAggregate) => {
                "Failed to update inventory aggregate"
            }
        }
    }
}

/// Non-success HTTP response from the inventory API.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Request failed with status code {}: {body}", .status.as_u16())]
    Status { status: StatusCode, body: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_and_methods() {
        assert_eq!(InventoryResource::Inventory.path(), "inventory");
        assert_eq!(
            InventoryResource::InventoryAggregate.path(),
            "inventory-aggregate"
        );
        assert_eq!(Mutation::Create.method(), Method::POST);
        assert_eq!(Mutation::Update.method(), Method::PUT);
    }

    #[test]
    fn test_status_error_message() {
        let err = GatewayError::Status {
            status: StatusCode::NOT_FOUND,
            body: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed with status code 404: missing");
    }
}
