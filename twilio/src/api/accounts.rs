//! Account-level credentials stored for other products (v1 API)

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tfplug::WriteIntent;

use super::common::{deserialize_optional_timestamp, deserialize_timestamp, segment, Form};
use super::{ApiError, Client, Product};

const AWS_CREDENTIALS_PATH: &str = "/v1/Credentials/AWS";

/// Stored AWS key pair; the key material itself is never returned
#[derive(Debug, Clone, Deserialize)]
pub struct AwsCredential {
    pub sid: String,
    pub account_sid: String,
    pub friendly_name: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_created: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date_updated: Option<DateTime<Utc>>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AwsCredentialInput {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub friendly_name: WriteIntent<String>,
    /// Subaccount to store the credential on; the authenticated account when omitted
    pub account_sid: WriteIntent<String>,
}

impl AwsCredentialInput {
    /// Twilio takes the pair as one `<access key id>:<secret>` value
    pub fn form(&self) -> Form {
        Form::new()
            .field(
                "Credentials",
                format!("{}:{}", self.access_key_id, self.secret_access_key),
            )
            .intent("FriendlyName", &self.friendly_name)
            .intent("AccountSid", &self.account_sid)
    }
}

fn aws_credential_path(sid: &str) -> String {
    format!("{}/{}", AWS_CREDENTIALS_PATH, segment(sid))
}

impl Client {
    pub async fn create_aws_credential(
        &self,
        input: &AwsCredentialInput,
    ) -> Result<AwsCredential, ApiError> {
        self.post(Product::Accounts, AWS_CREDENTIALS_PATH, &input.form())
            .await
    }

    pub async fn get_aws_credential(&self, sid: &str) -> Result<AwsCredential, ApiError> {
        self.get(Product::Accounts, &aws_credential_path(sid)).await
    }

    pub async fn update_aws_credential(
        &self,
        sid: &str,
        friendly_name: &WriteIntent<String>,
    ) -> Result<AwsCredential, ApiError> {
        let form = Form::new().intent("FriendlyName", friendly_name);
        self.post(Product::Accounts, &aws_credential_path(sid), &form)
            .await
    }

    pub async fn delete_aws_credential(&self, sid: &str) -> Result<(), ApiError> {
        self.delete(Product::Accounts, &aws_credential_path(sid)).await
    }
}
