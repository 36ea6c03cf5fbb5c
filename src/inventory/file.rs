//! Inventory backed by a collector-produced JSON document

use anyhow::anyhow;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{Fetched, Inventory, ParameterScope, ParameterSource};
use crate::error::InventoryError;

/// Inventory loaded from a JSON file
#[derive(Debug, Clone)]
pub struct FileInventory {
    path: PathBuf,
    inventory: Inventory,
}

impl FileInventory {
    /// Read and parse the inventory document
    pub async fn load(path: &Path) -> Result<Self, InventoryError> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| InventoryError::FileRead {
                    path: path.display().to_string(),
                    source: e,
                })?;

        let inventory = Self::parse(&content, path)?;
        debug!(path = %path.display(), "Inventory loaded");

        Ok(Self {
            path: path.to_path_buf(),
            inventory,
        })
    }

    /// Build from an already-parsed inventory
    pub fn from_inventory(inventory: Inventory) -> Self {
        Self {
            path: PathBuf::from("<memory>"),
            inventory,
        }
    }

    fn parse(content: &str, path: &Path) -> Result<Inventory, InventoryError> {
        serde_json::from_str(content).map_err(|e| InventoryError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }
}

#[async_trait::async_trait]
impl ParameterSource for FileInventory {
    async fn describe_parameters(
        &self,
        group_name: &str,
        scope: ParameterScope,
    ) -> anyhow::Result<Vec<(String, String)>> {
        let groups = match scope {
            ParameterScope::Cluster => &self.inventory.parameter_groups.cluster,
            ParameterScope::Instance => &self.inventory.parameter_groups.instance,
        };

        match groups.get(group_name) {
            Some(Fetched::Available(entries)) => Ok(entries
                .iter()
                .filter_map(|p| p.value.as_ref().map(|v| (p.name.clone(), v.clone())))
                .collect()),
            Some(Fetched::Failed { error }) => Err(anyhow!(
                "DescribeParameters failed for {} parameter group '{}': {}",
                scope,
                group_name,
                error
            )),
            None => Err(anyhow!(
                "{} parameter group '{}' not found in inventory",
                scope,
                group_name
            )),
        }
    }
}
