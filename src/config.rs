// ABOUTME: TOML configuration for the reconciler
// ABOUTME: Table name, placeholder insert defaults, inventory API endpoint and fixture path

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::reconcile::inserts::PlaceholderResolver;
use crate::remote::DEFAULT_API_BASE_URL;
use crate::sql::INVENTORY_TABLE;
use crate::utils::validate_sql_identifier;

/// Reconciler settings, usually read from `reconciler.toml`.
///
/// ```toml
/// inventory_table = "inventory"
/// default_quantity = 100
/// sku_id_prefix = "sku_id_"
/// api_base_url = "https://local-inventory.nabis.dev/v1"
/// request_timeout_secs = 30
/// fixtures = "fixtures/snapshot.json"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    pub inventory_table: String,
    pub default_quantity: i64,
    pub sku_id_prefix: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub fixtures: Option<PathBuf>,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            inventory_table: INVENTORY_TABLE.to_string(),
            default_quantity: 100,
            sku_id_prefix: "sku_id_".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
            fixtures: None,
        }
    }
}

impl ReconcilerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml(&contents).with_context(|| format!("Invalid config file {:?}", path))
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: ReconcilerConfig =
            toml::from_str(contents).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that end up inside generated SQL.
    pub fn validate(&self) -> Result<()> {
        validate_sql_identifier(&self.inventory_table).context("Invalid inventory_table")?;
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn placeholder_resolver(&self) -> PlaceholderResolver {
        PlaceholderResolver {
            sku_id_prefix: self.sku_id_prefix.clone(),
            default_quantity: self.default_quantity,
        }
    }
}
