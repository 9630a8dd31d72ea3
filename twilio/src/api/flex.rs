//! Flex plugins and their versions (v1 API)

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::common::{deserialize_optional_timestamp, deserialize_timestamp, segment};
use super::{ApiError, Client, Product};

#[derive(Debug, Clone, Deserialize)]
pub struct Plugin {
    pub sid: String,
    pub account_sid: String,
    pub unique_name: String,
    pub friendly_name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_created: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date_updated: Option<DateTime<Utc>>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PluginVersion {
    pub sid: String,
    pub version: String,
    pub plugin_url: Option<String>,
    pub changelog: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub archived: bool,
}

#[derive(Debug, Deserialize)]
struct PluginVersionsPage {
    plugin_versions: Vec<PluginVersion>,
}

impl Client {
    /// Fetches a plugin by SID or unique name
    pub async fn get_flex_plugin(&self, identifier: &str) -> Result<Plugin, ApiError> {
        let path = format!("/v1/PluginService/Plugins/{}", segment(identifier));
        self.get(Product::FlexApi, &path).await
    }

    /// Newest version of a plugin; the API lists versions newest first, so
    /// only the first page is fetched
    pub async fn latest_flex_plugin_version(
        &self,
        plugin_sid: &str,
    ) -> Result<Option<PluginVersion>, ApiError> {
        let path = format!("/v1/PluginService/Plugins/{}/Versions", segment(plugin_sid));
        let page: PluginVersionsPage = self
            .get_with_query(Product::FlexApi, &path, &[("PageSize", "5".to_string())])
            .await?;
        Ok(page.plugin_versions.into_iter().next())
    }
}
