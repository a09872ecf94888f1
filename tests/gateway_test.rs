//! Integration tests for the inventory API client using wiremock.
//!
//! Covers create and update calls on the single-record and aggregate
//! endpoints, non-success statuses and network failures.

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use inventory_reconciler::remote::{GatewayError, InventoryClient, InventoryGateway};
use inventory_reconciler::InventoryRecord;

// =============================================================================
// Test Helpers
// =============================================================================

fn test_record() -> InventoryRecord {
    InventoryRecord {
        sku_batch_id: "test-sku-batch-id".to_string(),
        sku_id: "test-sku-id".to_string(),
        wms_id: 1234,
        quantity_per_unit_of_measure: 100.0,
        is_archived: false,
        is_deleted: false,
        warehouse_id: "test-warehouse-id".to_string(),
    }
}

fn client_for(server: &MockServer) -> InventoryClient {
    InventoryClient::new(&format!("{}/v1", server.uri()), Duration::from_secs(5)).unwrap()
}

// =============================================================================
// Single-record endpoint
// =============================================================================

#[tokio::test]
async fn test_post_inventory_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/inventory"))
        .and(body_json(json!({
            "skuBatchId": "test-sku-batch-id",
            "skuId": "test-sku-id",
            "wmsId": 1234,
            "quantityPerUnitOfMeasure": 100.0,
            "isArchived": false,
            "isDeleted": false,
            "warehouseId": "test-warehouse-id"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Success"})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).post_inventory(&test_record()).await.unwrap();
    assert_eq!(result, json!({"message": "Success"}));
}

#[tokio::test]
async fn test_put_inventory_success() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/inventory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Updated"})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).put_inventory(&test_record()).await.unwrap();
    assert_eq!(result, json!({"message": "Updated"}));
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/inventory"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let result = client_for(&server).put_inventory(&test_record()).await.unwrap();
    assert!(result.is_null());
}

// =============================================================================
// Aggregate endpoint
// =============================================================================

#[tokio::test]
async fn test_post_inventory_aggregate_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/inventory-aggregate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Aggregate Success"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let records = vec![test_record(), test_record()];
    let result = client_for(&server)
        .post_inventory_aggregate(&records)
        .await
        .unwrap();
    assert_eq!(result, json!({"message": "Aggregate Success"}));
}

#[tokio::test]
async fn test_put_inventory_aggregate_success() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/inventory-aggregate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Aggregate Updated"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .put_inventory_aggregate(&[test_record()])
        .await
        .unwrap();
    assert_eq!(result, json!({"message": "Aggregate Updated"}));
}

#[tokio::test]
async fn test_aggregate_without_route_fails_with_404() {
    let server = MockServer::start().await;

    // Only the single-record route exists
    Mock::given(method("PUT"))
        .and(path("/v1/inventory"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .post_inventory_aggregate(&[test_record()])
        .await
        .unwrap_err();

    match err.downcast_ref::<GatewayError>() {
        Some(GatewayError::Status { status, .. }) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected status error, got {:?}", other),
    }
    assert!(err.to_string().contains("Request failed with status code 404"));
}

#[tokio::test]
async fn test_server_error_keeps_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/inventory-aggregate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("warehouse offline"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .put_inventory_aggregate(&[test_record()])
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Request failed with status code 500: warehouse offline"
    );
}

// =============================================================================
// Network failures
// =============================================================================

#[tokio::test]
async fn test_network_error_is_propagated() {
    // Start and drop a server so the port refuses connections
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let client = InventoryClient::new(&uri, Duration::from_secs(2)).unwrap();
    let err = client.post_inventory(&test_record()).await.unwrap_err();

    assert!(err.downcast_ref::<reqwest::Error>().is_some());
}
