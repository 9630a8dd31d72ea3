//! Programmable Chat channel members (v2 API)

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tfplug::WriteIntent;

use super::common::{
    deserialize_optional_int, deserialize_optional_timestamp, deserialize_timestamp, segment, Form,
};
use super::{ApiError, Client, Product};

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelMember {
    pub sid: String,
    pub account_sid: String,
    pub service_sid: String,
    pub channel_sid: String,
    pub identity: String,
    pub role_sid: Option<String>,
    pub attributes: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_int")]
    pub last_consumed_message_index: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub last_consumption_timestamp: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_created: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date_updated: Option<DateTime<Utc>>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelMemberInput {
    pub identity: WriteIntent<String>,
    pub role_sid: WriteIntent<String>,
    pub attributes: WriteIntent<String>,
}

impl ChannelMemberInput {
    pub fn form(&self) -> Form {
        Form::new()
            .intent("Identity", &self.identity)
            .intent("RoleSid", &self.role_sid)
            .intent("Attributes", &self.attributes)
    }
}

fn members_path(service_sid: &str, channel_sid: &str) -> String {
    format!(
        "/v2/Services/{}/Channels/{}/Members",
        segment(service_sid),
        segment(channel_sid)
    )
}

fn member_path(service_sid: &str, channel_sid: &str, sid: &str) -> String {
    format!("{}/{}", members_path(service_sid, channel_sid), segment(sid))
}

impl Client {
    pub async fn create_channel_member(
        &self,
        service_sid: &str,
        channel_sid: &str,
        input: &ChannelMemberInput,
    ) -> Result<ChannelMember, ApiError> {
        self.post(
            Product::Chat,
            &members_path(service_sid, channel_sid),
            &input.form(),
        )
        .await
    }

    pub async fn get_channel_member(
        &self,
        service_sid: &str,
        channel_sid: &str,
        sid: &str,
    ) -> Result<ChannelMember, ApiError> {
        self.get(Product::Chat, &member_path(service_sid, channel_sid, sid))
            .await
    }

    pub async fn update_channel_member(
        &self,
        service_sid: &str,
        channel_sid: &str,
        sid: &str,
        input: &ChannelMemberInput,
    ) -> Result<ChannelMember, ApiError> {
        self.post(
            Product::Chat,
            &member_path(service_sid, channel_sid, sid),
            &input.form(),
        )
        .await
    }

    pub async fn delete_channel_member(
        &self,
        service_sid: &str,
        channel_sid: &str,
        sid: &str,
    ) -> Result<(), ApiError> {
        self.delete(Product::Chat, &member_path(service_sid, channel_sid, sid))
            .await
    }
}
