//! Reads the account's video recording settings

use async_trait::async_trait;
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::{Config, Context, DataSource, Result, State, TfplugError};

use crate::api::Client;
use crate::resources::video_recording_settings::settings_state;

pub const TYPE_NAME: &str = "twilio_video_recording_settings";

pub struct RecordingSettingsDataSource {
    client: Client,
}

impl RecordingSettingsDataSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

pub fn schema() -> Schema {
    let mut builder = SchemaBuilder::new()
        .version(0)
        .description("Reads the account's default video recording settings");

    for (name, attribute_type) in [
        ("account_sid", AttributeType::String),
        ("aws_credentials_sid", AttributeType::String),
        ("aws_s3_url", AttributeType::String),
        ("aws_storage_enabled", AttributeType::Bool),
        ("encryption_enabled", AttributeType::Bool),
        ("encryption_key_sid", AttributeType::String),
        ("friendly_name", AttributeType::String),
        ("url", AttributeType::String),
    ] {
        builder = builder.attribute(AttributeBuilder::new(name, attribute_type).computed().build());
    }

    builder.build()
}

#[async_trait]
impl DataSource for RecordingSettingsDataSource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn display_name(&self) -> &str {
        "video recording settings"
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn read(&self, _ctx: &Context, _config: &Config) -> Result<State> {
        let settings = self.client.get_recording_settings().await.map_err(|e| {
            if e.is_not_found() {
                TfplugError::NotFound("Video recording settings was not found".to_string())
            } else {
                e.into()
            }
        })?;
        settings_state(&settings)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::api::test_helpers::{create_test_client, dynamic, TEST_ACCOUNT_SID};
    use mockito::Server;
    use serde_json::json;
    use std::sync::Arc;
    use tfplug::request::ReadDataSourceRequest;
    use tfplug::{AttributePath, DataSourceReader};

    fn reader(server: &mockito::ServerGuard) -> DataSourceReader {
        DataSourceReader::new(Arc::new(RecordingSettingsDataSource::new(
            create_test_client(&server.url()),
        )))
    }

    #[tokio::test]
    async fn test_read_uses_account_as_id() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v1/RecordingSettings/Default")
            .with_status(200)
            .with_body(
                json!({
                    "account_sid": TEST_ACCOUNT_SID,
                    "friendly_name": "default",
                    "aws_credentials_sid": null,
                    "aws_s3_url": null,
                    "aws_storage_enabled": false,
                    "encryption_key_sid": null,
                    "encryption_enabled": false,
                    "url": "https://video.twilio.com/v1/RecordingSettings/Default"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let response = reader(&server)
            .read(ReadDataSourceRequest {
                context: Context::new(),
                config: dynamic(json!({})),
            })
            .await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        let state = response.state.unwrap();
        assert_eq!(state.id().as_deref(), Some(TEST_ACCOUNT_SID));
        assert!(!state
            .get_bool(&AttributePath::new("aws_storage_enabled"))
            .unwrap());
        assert!(!state.has(&AttributePath::new("aws_s3_url")));
    }

    #[tokio::test]
    async fn test_missing_settings_are_an_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v1/RecordingSettings/Default")
            .with_status(404)
            .with_body(r#"{"code": 20404, "message": "Not found", "status": 404}"#)
            .create_async()
            .await;

        let response = reader(&server)
            .read(ReadDataSourceRequest {
                context: Context::new(),
                config: dynamic(json!({})),
            })
            .await;

        assert!(response.state.is_none());
        assert!(response.diagnostics[0]
            .detail
            .contains("Video recording settings was not found"));
    }
}
