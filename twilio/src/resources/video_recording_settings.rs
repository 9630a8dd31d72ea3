//! Video recording settings resource
//!
//! The settings object always exists for an account. Creating the resource
//! writes the settings, and destroying it only forgets them.

use async_trait::async_trait;
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::validator::UrlValidator;
use tfplug::{AttributePath, Changes, Config, Context, Lifecycle, Resource, Result, State};

use crate::api::video::{RecordingSettings, RecordingSettingsInput};
use crate::api::Client;
use crate::validation;

pub const TYPE_NAME: &str = "twilio_video_recording_settings";

pub struct RecordingSettingsResource {
    client: Client,
}

impl RecordingSettingsResource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn write(&self, changes: &Changes<'_>) -> Result<RecordingSettings> {
        let input = RecordingSettingsInput {
            friendly_name: changes.require_string("friendly_name")?,
            aws_credentials_sid: changes.string("aws_credentials_sid"),
            aws_s3_url: changes.string("aws_s3_url"),
            aws_storage_enabled: changes.bool("aws_storage_enabled"),
            encryption_key_sid: changes.string("encryption_key_sid"),
            encryption_enabled: changes.bool("encryption_enabled"),
        };
        Ok(self.client.update_recording_settings(&input).await?)
    }
}

pub fn schema() -> Schema {
    SchemaBuilder::new()
        .version(0)
        .description("Manages the account's default video recording settings")
        .attribute(
            AttributeBuilder::new("account_sid", AttributeType::String)
                .computed()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("friendly_name", AttributeType::String)
                .description("The friendly name of the settings")
                .required()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("aws_credentials_sid", AttributeType::String)
                .description("AWS credentials used to upload recordings")
                .optional()
                .validator(validation::CREDENTIAL_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("aws_s3_url", AttributeType::String)
                .description("S3 location recordings are uploaded to")
                .optional()
                .validator(UrlValidator)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("aws_storage_enabled", AttributeType::Bool)
                .optional()
                .default(false)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("encryption_key_sid", AttributeType::String)
                .description("Public key credential used to encrypt recordings")
                .optional()
                .validator(validation::CREDENTIAL_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("encryption_enabled", AttributeType::Bool)
                .optional()
                .default(false)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("url", AttributeType::String)
                .computed()
                .build(),
        )
        .build()
}

pub(crate) fn settings_state(settings: &RecordingSettings) -> Result<State> {
    let mut state = State::empty_object();
    state.set_id(settings.account_sid.clone());
    state.set_string(&AttributePath::new("account_sid"), settings.account_sid.clone())?;
    state.set_string(&AttributePath::new("friendly_name"), settings.friendly_name.clone())?;
    state.set_optional(
        &AttributePath::new("aws_credentials_sid"),
        settings.aws_credentials_sid.clone(),
    )?;
    state.set_optional(&AttributePath::new("aws_s3_url"), settings.aws_s3_url.clone())?;
    state.set_bool(
        &AttributePath::new("aws_storage_enabled"),
        settings.aws_storage_enabled,
    )?;
    state.set_optional(
        &AttributePath::new("encryption_key_sid"),
        settings.encryption_key_sid.clone(),
    )?;
    state.set_bool(
        &AttributePath::new("encryption_enabled"),
        settings.encryption_enabled,
    )?;
    state.set_string(&AttributePath::new("url"), settings.url.clone())?;
    Ok(state)
}

#[async_trait]
impl Resource for RecordingSettingsResource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn display_name(&self) -> &str {
        "video recording settings"
    }

    fn schema(&self) -> Schema {
        schema()
    }

    fn lifecycle(&self) -> Lifecycle {
        Lifecycle::Singleton
    }

    async fn create(&self, _ctx: &Context, config: &Config) -> Result<State> {
        let settings = self.write(&Changes::creating(config)).await?;
        let mut seed = State::empty_object();
        seed.set_id(settings.account_sid);
        Ok(seed)
    }

    async fn read(&self, _ctx: &Context, _state: &State) -> Result<State> {
        let settings = self.client.get_recording_settings().await?;
        settings_state(&settings)
    }

    async fn update(&self, _ctx: &Context, changes: &Changes<'_>) -> Result<()> {
        self.write(changes).await?;
        Ok(())
    }

    async fn delete(&self, _ctx: &Context, _state: &State) -> Result<()> {
        Ok(())
    }
}
