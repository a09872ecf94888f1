// ABOUTME: HTTP client for the remote inventory API
// ABOUTME: Creates and updates inventory records, logging and propagating every failure

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::models::{GatewayError, InventoryResource, Mutation, DEFAULT_API_BASE_URL};
use crate::model::InventoryRecord;

/// Applies record mutations on the remote inventory service.
///
/// Each call resolves with the response body, or fails on a network error or a
/// non-success status. Nothing is retried here.
#[async_trait]
pub trait InventoryGateway: Send + Sync {
    async fn post_inventory(&self, record: &InventoryRecord) -> Result<Value>;
    async fn put_inventory(&self, record: &InventoryRecord) -> Result<Value>;
    async fn post_inventory_aggregate(&self, records: &[InventoryRecord]) -> Result<Value>;
    async fn put_inventory_aggregate(&self, records: &[InventoryRecord]) -> Result<Value>;
}

pub struct InventoryClient {
    client: Client,
    api_base_url: String,
}

impl InventoryClient {
    pub fn new(api_base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client for the default inventory service with a 30 second timeout.
    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_API_BASE_URL, Duration::from_secs(30))
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn url(&self, resource: InventoryResource) -> String {
        format!("{}/{}", self.api_base_url, resource.path())
    }

    async fn send<T>(&self, mutation: Mutation, resource: InventoryResource, body: &T) -> Result<Value>
    where
        T: Serialize + ?Sized + Sync,
    {
        let url = self.url(resource);
        tracing::debug!("{} {}", mutation.method(), url);

        let result = self.try_send(mutation, &url, body).await;
        if let Err(e) = &result {
            tracing::error!("{}: {:?}", mutation.failure_message(resource), e);
        }
        result
    }

    async fn try_send<T>(&self, mutation: Mutation, url: &str, body: &T) -> Result<Value>
    where
        T: Serialize + ?Sized + Sync,
    {
        let response = self
            .client
            .request(mutation.method(), url)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GatewayError::Status { status, body: text }.into());
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).context("Failed to parse inventory API response")
    }
}

#[async_trait]
impl InventoryGateway for InventoryClient {
    async fn post_inventory(&self, record: &InventoryRecord) -> Result<Value> {
        self.send(Mutation::Create, InventoryResource::Inventory, record)
            .await
    }

    async fn put_inventory(&self, record: &InventoryRecord) -> Result<Value> {
        self.send(Mutation::Update, InventoryResource::Inventory, record)
            .await
    }

    async fn post_inventory_aggregate(&self, records: &[InventoryRecord]) -> Result<Value> {
        self.send(Mutation::Create, InventoryResource::InventoryAggregate, records)
            .await
    }

    async fn put_inventory_aggregate(&self, records: &[InventoryRecord]) -> Result<Value> {
        self.send(Mutation::Update, InventoryResource::InventoryAggregate, records)
            .await
    }
}
