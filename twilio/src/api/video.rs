//! Video recording settings (v1 API)

use serde::Deserialize;
use tfplug::WriteIntent;

use super::common::Form;
use super::{ApiError, Client, Product};

const RECORDING_SETTINGS_PATH: &str = "/v1/RecordingSettings/Default";

/// Account-wide settings; always exist, so there is no create or delete
#[derive(Debug, Clone, Deserialize)]
pub struct RecordingSettings {
    pub account_sid: String,
    pub friendly_name: String,
    pub aws_credentials_sid: Option<String>,
    pub aws_s3_url: Option<String>,
    #[serde(default)]
    pub aws_storage_enabled: bool,
    pub encryption_key_sid: Option<String>,
    #[serde(default)]
    pub encryption_enabled: bool,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSettingsInput {
    /// Twilio requires the friendly name on every write
    pub friendly_name: String,
    pub aws_credentials_sid: WriteIntent<String>,
    pub aws_s3_url: WriteIntent<String>,
    pub aws_storage_enabled: WriteIntent<bool>,
    pub encryption_key_sid: WriteIntent<String>,
    pub encryption_enabled: WriteIntent<bool>,
}

impl RecordingSettingsInput {
    pub fn form(&self) -> Form {
        Form::new()
            .field("FriendlyName", self.friendly_name.as_str())
            .intent("AwsCredentialsSid", &self.aws_credentials_sid)
            .intent("AwsS3Url", &self.aws_s3_url)
            .intent("AwsStorageEnabled", &self.aws_storage_enabled)
            .intent("EncryptionKeySid", &self.encryption_key_sid)
            .intent("EncryptionEnabled", &self.encryption_enabled)
    }
}

impl Client {
    pub async fn get_recording_settings(&self) -> Result<RecordingSettings, ApiError> {
        self.get(Product::Video, RECORDING_SETTINGS_PATH).await
    }

    pub async fn update_recording_settings(
        &self,
        input: &RecordingSettingsInput,
    ) -> Result<RecordingSettings, ApiError> {
        self.post(Product::Video, RECORDING_SETTINGS_PATH, &input.form())
            .await
    }
}
