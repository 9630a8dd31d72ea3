//! Elastic SIP trunk IP access control list associations (v1 API)

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::common::{deserialize_optional_timestamp, deserialize_timestamp, segment, Form};
use super::{ApiError, Client, Product};

/// An IP access control list attached to a trunk; its SID is the list's SID
#[derive(Debug, Clone, Deserialize)]
pub struct TrunkIpAccessControlList {
    pub sid: String,
    pub account_sid: String,
    pub trunk_sid: String,
    pub friendly_name: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_created: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date_updated: Option<DateTime<Utc>>,
    pub url: String,
}

fn lists_path(trunk_sid: &str) -> String {
    format!("/v1/Trunks/{}/IpAccessControlLists", segment(trunk_sid))
}

fn list_path(trunk_sid: &str, sid: &str) -> String {
    format!("{}/{}", lists_path(trunk_sid), segment(sid))
}

impl Client {
    pub async fn add_trunk_ip_access_control_list(
        &self,
        trunk_sid: &str,
        ip_access_control_list_sid: &str,
    ) -> Result<TrunkIpAccessControlList, ApiError> {
        let form = Form::new().field("IpAccessControlListSid", ip_access_control_list_sid);
        self.post(Product::Trunking, &lists_path(trunk_sid), &form)
            .await
    }

    pub async fn get_trunk_ip_access_control_list(
        &self,
        trunk_sid: &str,
        sid: &str,
    ) -> Result<TrunkIpAccessControlList, ApiError> {
        self.get(Product::Trunking, &list_path(trunk_sid, sid)).await
    }

    pub async fn remove_trunk_ip_access_control_list(
        &self,
        trunk_sid: &str,
        sid: &str,
    ) -> Result<(), ApiError> {
        self.delete(Product::Trunking, &list_path(trunk_sid, sid))
            .await
    }
}
