//! Serverless environments (v1 API)

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::common::{deserialize_optional_timestamp, deserialize_timestamp, segment};
use super::{ApiError, Client, Product};

#[derive(Debug, Clone, Deserialize)]
pub struct Environment {
    pub sid: String,
    pub account_sid: String,
    pub service_sid: String,
    /// Unset until a build has been deployed
    pub build_sid: Option<String>,
    pub unique_name: String,
    pub domain_suffix: Option<String>,
    pub domain_name: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_created: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date_updated: Option<DateTime<Utc>>,
    pub url: String,
}

impl Client {
    pub async fn get_serverless_environment(
        &self,
        service_sid: &str,
        sid: &str,
    ) -> Result<Environment, ApiError> {
        let path = format!(
            "/v1/Services/{}/Environments/{}",
            segment(service_sid),
            segment(sid)
        );
        self.get(Product::Serverless, &path).await
    }
}
