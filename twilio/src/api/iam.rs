//! Account API keys (2010-04-01 API)

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tfplug::WriteIntent;

use super::common::{deserialize_optional_timestamp, deserialize_timestamp, segment, Form};
use super::{ApiError, Client, Product};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiKey {
    pub sid: String,
    pub friendly_name: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_created: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date_updated: Option<DateTime<Utc>>,
}

/// Create response; the secret is only ever returned here
#[derive(Debug, Clone, Deserialize)]
pub struct NewApiKey {
    pub sid: String,
    pub secret: String,
}

fn keys_path(account_sid: &str) -> String {
    format!("/2010-04-01/Accounts/{}/Keys", segment(account_sid))
}

fn key_path(account_sid: &str, sid: &str) -> String {
    format!("{}/{}.json", keys_path(account_sid), segment(sid))
}

impl Client {
    pub async fn create_api_key(
        &self,
        account_sid: &str,
        friendly_name: &WriteIntent<String>,
    ) -> Result<NewApiKey, ApiError> {
        let form = Form::new().intent("FriendlyName", friendly_name);
        let path = format!("{}.json", keys_path(account_sid));
        self.post(Product::Api, &path, &form).await
    }

    pub async fn get_api_key(&self, account_sid: &str, sid: &str) -> Result<ApiKey, ApiError> {
        self.get(Product::Api, &key_path(account_sid, sid)).await
    }

    pub async fn update_api_key(
        &self,
        account_sid: &str,
        sid: &str,
        friendly_name: &WriteIntent<String>,
    ) -> Result<ApiKey, ApiError> {
        let form = Form::new().intent("FriendlyName", friendly_name);
        self.post(Product::Api, &key_path(account_sid, sid), &form)
            .await
    }

    pub async fn delete_api_key(&self, account_sid: &str, sid: &str) -> Result<(), ApiError> {
        self.delete(Product::Api, &key_path(account_sid, sid)).await
    }
}
