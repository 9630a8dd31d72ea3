//! Proxy service short codes (v1 API)

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tfplug::Page;

use super::common::{
    deserialize_optional_timestamp, deserialize_timestamp, segment, ListResponse, PageMeta,
};
use super::{ApiError, Client, Product};

#[derive(Debug, Clone, Deserialize)]
pub struct ShortCode {
    pub sid: String,
    pub account_sid: String,
    pub service_sid: String,
    pub short_code: String,
    pub iso_country: Option<String>,
    pub capabilities: Option<ShortCodeCapabilities>,
    #[serde(default)]
    pub is_reserved: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_created: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date_updated: Option<DateTime<Utc>>,
    pub url: String,
}

/// Capability flags; Twilio omits the ones that do not apply
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShortCodeCapabilities {
    pub fax_inbound: bool,
    pub fax_outbound: bool,
    pub mms_inbound: bool,
    pub mms_outbound: bool,
    pub restriction_fax_domestic: bool,
    pub restriction_mms_domestic: bool,
    pub restriction_sms_domestic: bool,
    pub restriction_voice_domestic: bool,
    pub sip_trunking: bool,
    pub sms_inbound: bool,
    pub sms_outbound: bool,
    pub voice_inbound: bool,
    pub voice_outbound: bool,
}

#[derive(Debug, Deserialize)]
struct ShortCodesPage {
    short_codes: Vec<ShortCode>,
    #[serde(default)]
    meta: PageMeta,
}

impl ListResponse for ShortCodesPage {
    type Item = ShortCode;

    fn into_page(self) -> Page<ShortCode> {
        Page {
            items: self.short_codes,
            next: self.meta.next_page_url,
        }
    }
}

impl Client {
    pub async fn list_proxy_short_codes(
        &self,
        service_sid: &str,
    ) -> Result<Vec<ShortCode>, ApiError> {
        let path = format!("/v1/Services/{}/ShortCodes", segment(service_sid));
        self.list_all::<ShortCodesPage>(Product::Proxy, &path, &[("PageSize", "50".to_string())])
            .await
    }
}
