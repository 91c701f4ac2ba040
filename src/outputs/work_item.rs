//! File-backed work items.
//!
//! A work item is a JSON document with a free-form `payload` and a map of
//! named `variables`. The run reads one input item, copies its payload to the
//! output item, and stores the collected results under [`RESULTS_VARIABLE`].

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument};

pub const RESULTS_VARIABLE: &str = "results";

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct WorkItem {
    #[serde(default)]
    pub payload: Value,
    #[serde(default)]
    pub variables: BTreeMap<String, Value>,
}

impl WorkItem {
    /// Read the input work item; a missing file yields an empty item.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self> {
        if !fs::try_exists(path).await? {
            debug!("No input work item; starting empty");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).await?;
        let item = serde_json::from_str(&raw)?;
        info!("Loaded input work item");
        Ok(item)
    }

    /// New output item carrying this item's payload.
    pub fn derive_output(&self) -> Self {
        Self {
            payload: self.payload.clone(),
            variables: BTreeMap::new(),
        }
    }

    pub fn set_variable(&mut self, name: &str, value: impl Serialize) -> Result<()> {
        self.variables
            .insert(name.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Persist the item as pretty JSON, creating parent directories.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?).await?;
        info!(variables = self.variables.len(), "Saved work item");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResultSet, SearchResult};
    use serde_json::json;

    #[tokio::test]
    async fn test_load_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let item = WorkItem::load(&dir.path().join("input.json")).await.unwrap();
        assert_eq!(item, WorkItem::default());
    }

    #[tokio::test]
    async fn test_load_payload_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        std::fs::write(&path, r#"{"payload": {"batch": 7}}"#).unwrap();

        let item = WorkItem::load(&path).await.unwrap();
        assert_eq!(item.payload, json!({"batch": 7}));
        assert!(item.variables.is_empty());
    }

    #[tokio::test]
    async fn test_save_results_variable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("work-items-out").join("output.json");

        let input = WorkItem {
            payload: json!({"batch": 7}),
            variables: BTreeMap::new(),
        };
        let mut results = ResultSet::new();
        results.push(SearchResult {
            title: "Title".to_string(),
            date: "2 hours ago".to_string(),
            description: "Description".to_string(),
            picture: "1_challenge.png".to_string(),
            count_search_phrases: 0,
            description_contains_money: false,
        });

        let mut output = input.derive_output();
        output.set_variable(RESULTS_VARIABLE, &results).unwrap();
        output.save(&path).await.unwrap();

        let saved: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["payload"], json!({"batch": 7}));
        assert_eq!(saved["variables"]["results"]["title"], json!(["Title"]));
        assert_eq!(
            saved["variables"]["results"]["picture"],
            json!(["1_challenge.png"])
        );
    }
}
