//! Loading and validating the run configuration.
//!
//! The configuration lives in a local asset store: a JSON document mapping
//! asset names to JSON values. The search settings are stored under
//! [`CONFIG_ASSET`].

use crate::error::{HarvestError, Result};
use crate::filters::RecencyWindow;
use crate::models::SearchConfig;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{info, instrument};
use url::Url;

/// Asset holding `{search, range_news, web_site}`.
pub const CONFIG_ASSET: &str = "Config_Data_Challenge";

/// A read-only key/value store of JSON assets.
#[derive(Debug, Default)]
pub struct AssetStore {
    assets: Map<String, Value>,
}

impl AssetStore {
    pub fn from_json(json: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(assets) => Ok(Self { assets }),
            _ => Err(HarvestError::Config(
                "asset store must be a JSON object".to_string(),
            )),
        }
    }

    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let store = Self::from_json(&raw)?;
        info!(assets = store.assets.len(), "Loaded asset store");
        Ok(store)
    }

    pub fn get_json(&self, name: &str) -> Result<&Value> {
        self.assets
            .get(name)
            .ok_or_else(|| HarvestError::Config(format!("asset `{name}` not found")))
    }
}

impl SearchConfig {
    /// Read the search settings from `store` and validate them.
    pub fn from_store(store: &AssetStore) -> Result<Self> {
        let config: SearchConfig = serde_json::from_value(store.get_json(CONFIG_ASSET)?.clone())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.is_empty() {
            return Err(HarvestError::Config("search must not be empty".to_string()));
        }
        RecencyWindow::try_from(self.range_news)?;
        let url = Url::parse(&self.web_site)
            .map_err(|e| HarvestError::Config(format!("web_site `{}`: {e}", self.web_site)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(HarvestError::Config(format!(
                "web_site must be http or https, got `{}`",
                url.scheme()
            )));
        }
        Ok(())
    }

    pub fn window(&self) -> Result<RecencyWindow> {
        RecencyWindow::try_from(self.range_news)
    }
}
