//! Common types and utilities for the Twilio REST API

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tfplug::codec::{parse_timestamp, FormEncode};
use tfplug::{collect_pages, Page, WriteIntent};

use super::client::{Client, Product};
use super::error::ApiError;

/// Error body returned with non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub more_info: Option<String>,
    pub status: Option<u16>,
}

/// Form-encoded request body; keys may repeat for list parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<(String, String)>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    /// Adds the field unless the intent is to omit it
    pub fn intent<T: FormEncode>(mut self, key: &str, intent: &WriteIntent<T>) -> Self {
        if let Some(value) = intent.form_value() {
            self.fields.push((key.to_string(), value));
        }
        self
    }

    /// One field per element; clearing sends a single empty value
    pub fn repeated(mut self, key: &str, intent: &WriteIntent<Vec<String>>) -> Self {
        match intent {
            WriteIntent::Omit => {}
            WriteIntent::Set(values) => {
                for value in values {
                    self.fields.push((key.to_string(), value.clone()));
                }
            }
            WriteIntent::Clear => self.fields.push((key.to_string(), String::new())),
        }
        self
    }

    pub fn append(mut self, other: Form) -> Self {
        self.fields.extend(other.fields);
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// `meta` block of v1/v2 list responses
#[derive(Debug, Default, Deserialize)]
pub struct PageMeta {
    pub next_page_url: Option<String>,
}

/// A list response body that knows where its items and next-page link live
pub trait ListResponse: DeserializeOwned {
    type Item;

    fn into_page(self) -> Page<Self::Item>;
}

impl Client {
    /// Follows page links from `path` until the last page. A failing page
    /// fails the whole listing.
    pub async fn list_all<R: ListResponse>(
        &self,
        product: Product,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<R::Item>, ApiError> {
        collect_pages(|cursor| async move {
            let response: R = match cursor {
                None => self.get_with_query(product, path, query).await?,
                Some(next) => self.get_url(&self.url(product, &next)).await?,
            };
            Ok::<_, ApiError>(response.into_page())
        })
        .await
    }
}

/// Accepts ISO 8601 and RFC 2822 timestamps
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_timestamp(&value).map_err(serde::de::Error::custom)
}

/// Like [`deserialize_timestamp`], with null meaning never set
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.is_empty() => parse_timestamp(&value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Twilio serializes some numbers as strings depending on the API version
pub fn deserialize_optional_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i64),
        String(String),
    }

    match Option::<IntOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IntOrString::Int(i)) => Ok(Some(i)),
        Some(IntOrString::String(s)) if s.is_empty() => Ok(None),
        Some(IntOrString::String(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Percent-encodes a caller-supplied path segment
pub fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}
