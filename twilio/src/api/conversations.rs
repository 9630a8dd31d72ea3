//! Conversation-scoped webhooks and push credentials (v1 API)

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tfplug::WriteIntent;

use super::common::{
    deserialize_optional_int, deserialize_optional_timestamp, deserialize_timestamp, segment, Form,
};
use super::{ApiError, Client, Product};

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationWebhook {
    pub sid: String,
    pub account_sid: String,
    pub chat_service_sid: String,
    pub conversation_sid: String,
    pub target: String,
    pub configuration: WebhookConfiguration,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_created: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date_updated: Option<DateTime<Utc>>,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookConfiguration {
    pub url: Option<String>,
    pub method: Option<String>,
    #[serde(default)]
    pub filters: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_optional_int")]
    pub replay_after: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationWebhookInput {
    pub url: WriteIntent<String>,
    pub method: WriteIntent<String>,
    pub filters: WriteIntent<Vec<String>>,
    /// Only accepted when creating
    pub replay_after: WriteIntent<i64>,
}

impl ConversationWebhookInput {
    pub fn form(&self) -> Form {
        Form::new()
            .intent("Configuration.Url", &self.url)
            .intent("Configuration.Method", &self.method)
            .repeated("Configuration.Filters", &self.filters)
            .intent("Configuration.ReplayAfter", &self.replay_after)
    }
}

fn webhooks_path(service_sid: &str, conversation_sid: &str) -> String {
    format!(
        "/v1/Services/{}/Conversations/{}/Webhooks",
        segment(service_sid),
        segment(conversation_sid)
    )
}

fn webhook_path(service_sid: &str, conversation_sid: &str, sid: &str) -> String {
    format!(
        "{}/{}",
        webhooks_path(service_sid, conversation_sid),
        segment(sid)
    )
}

impl Client {
    /// Creates a webhook with the `webhook` target
    pub async fn create_conversation_webhook(
        &self,
        service_sid: &str,
        conversation_sid: &str,
        input: &ConversationWebhookInput,
    ) -> Result<ConversationWebhook, ApiError> {
        let form = Form::new().field("Target", "webhook").append(input.form());
        self.post(
            Product::Conversations,
            &webhooks_path(service_sid, conversation_sid),
            &form,
        )
        .await
    }

    pub async fn get_conversation_webhook(
        &self,
        service_sid: &str,
        conversation_sid: &str,
        sid: &str,
    ) -> Result<ConversationWebhook, ApiError> {
        self.get(
            Product::Conversations,
            &webhook_path(service_sid, conversation_sid, sid),
        )
        .await
    }

    pub async fn update_conversation_webhook(
        &self,
        service_sid: &str,
        conversation_sid: &str,
        sid: &str,
        input: &ConversationWebhookInput,
    ) -> Result<ConversationWebhook, ApiError> {
        self.post(
            Product::Conversations,
            &webhook_path(service_sid, conversation_sid, sid),
            &input.form(),
        )
        .await
    }

    pub async fn delete_conversation_webhook(
        &self,
        service_sid: &str,
        conversation_sid: &str,
        sid: &str,
    ) -> Result<(), ApiError> {
        self.delete(
            Product::Conversations,
            &webhook_path(service_sid, conversation_sid, sid),
        )
        .await
    }
}

const CREDENTIALS_PATH: &str = "/v1/Credentials";

/// Push notification credential; the secret is write-only
#[derive(Debug, Clone, Deserialize)]
pub struct PushCredential {
    pub sid: String,
    pub account_sid: String,
    pub friendly_name: Option<String>,
    #[serde(rename = "type")]
    pub credential_type: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_created: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date_updated: Option<DateTime<Utc>>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PushCredentialInput {
    pub friendly_name: WriteIntent<String>,
    pub secret: WriteIntent<String>,
}

impl PushCredentialInput {
    pub fn form(&self) -> Form {
        Form::new()
            .intent("FriendlyName", &self.friendly_name)
            .intent("Secret", &self.secret)
    }
}

fn credential_path(sid: &str) -> String {
    format!("{}/{}", CREDENTIALS_PATH, segment(sid))
}

impl Client {
    /// `credential_type` is the push platform, such as `fcm`
    pub async fn create_push_credential(
        &self,
        credential_type: &str,
        input: &PushCredentialInput,
    ) -> Result<PushCredential, ApiError> {
        let form = Form::new()
            .field("Type", credential_type)
            .append(input.form());
        self.post(Product::Conversations, CREDENTIALS_PATH, &form)
            .await
    }

    pub async fn get_push_credential(&self, sid: &str) -> Result<PushCredential, ApiError> {
        self.get(Product::Conversations, &credential_path(sid)).await
    }

    pub async fn update_push_credential(
        &self,
        sid: &str,
        input: &PushCredentialInput,
    ) -> Result<PushCredential, ApiError> {
        self.post(Product::Conversations, &credential_path(sid), &input.form())
            .await
    }

    pub async fn delete_push_credential(&self, sid: &str) -> Result<(), ApiError> {
        self.delete(Product::Conversations, &credential_path(sid))
            .await
    }
}
