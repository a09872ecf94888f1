// ABOUTME: Insert path for SKU batches missing from inventory
// ABOUTME: Set difference over batch ids plus a pluggable resolver for new-record attributes

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;

use crate::sql::{format_sql_value, SqlValue};

/// Attributes needed to create an inventory row for a new batch.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBatchAttributes {
    pub sku_id: String,
    pub quantity: i64,
}

/// Looks up the attributes of a batch that inventory has never seen.
#[async_trait]
pub trait NewRecordResolver: Send + Sync {
    async fn resolve(&self, sku_batch_id: &str) -> Result<NewBatchAttributes>;
}

/// Stand-in resolver: synthesizes `<prefix><id>` as the sku id and a fixed quantity.
///
/// Real attribute lookup replaces this without touching the insert builder.
#[derive(Debug, Clone)]
pub struct PlaceholderResolver {
    pub sku_id_prefix: String,
    pub default_quantity: i64,
}

impl Default for PlaceholderResolver {
    fn default() -> Self {
        Self {
            sku_id_prefix: "sku_id_".to_string(),
            default_quantity: 100,
        }
    }
}

#[async_trait]
impl NewRecordResolver for PlaceholderResolver {
    async fn resolve(&self, sku_batch_id: &str) -> Result<NewBatchAttributes> {
        Ok(NewBatchAttributes {
            sku_id: format!("{}{}", self.sku_id_prefix, sku_batch_id),
            quantity: self.default_quantity,
        })
    }
}

/// Batch ids present in `app_ids` but missing from `inventory_ids`.
///
/// Keeps `app_ids` order; an id repeated in `app_ids` is returned once.
pub fn find_new_sku_batch_ids(app_ids: &[String], inventory_ids: &[String]) -> Vec<String> {
    let known: HashSet<&str> = inventory_ids.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut new_ids = Vec::new();

    for id in app_ids {
        if !known.contains(id.as_str()) && seen.insert(id.as_str()) {
            new_ids.push(id.clone());
        }
    }

    new_ids
}

/// Build one INSERT per new batch id, in input order.
///
/// Produces `INSERT INTO <table> (sku_batch_id, sku_id, quantity) VALUES ('<id>', '<sku>', <qty>)`.
pub async fn sku_batch_to_inserts<R>(
    table: &str,
    sku_batch_ids: &[String],
    resolver: &R,
) -> Result<Vec<String>>
where
    R: NewRecordResolver + ?Sized,
{
    let mut statements = Vec::with_capacity(sku_batch_ids.len());

    for id in sku_batch_ids {
        let attributes = resolver.resolve(id).await?;
        statements.push(format!(
            "INSERT INTO {} (sku_batch_id, sku_id, quantity) VALUES ({}, {}, {})",
            table,
            format_sql_value(&SqlValue::from(id.as_str())),
            format_sql_value(&SqlValue::Text(attributes.sku_id)),
            format_sql_value(&SqlValue::Int(attributes.quantity)),
        ));
    }

    Ok(statements)
}
