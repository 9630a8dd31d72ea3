//! SIP domains and their IP access control list mappings (2010-04-01 API)

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tfplug::WriteIntent;

use super::common::{deserialize_optional_timestamp, deserialize_timestamp, segment, Form};
use super::{ApiError, Client, Product};

#[derive(Debug, Clone, Deserialize)]
pub struct SipDomain {
    pub sid: String,
    pub account_sid: String,
    pub auth_type: Option<String>,
    pub byoc_trunk_sid: Option<String>,
    pub domain_name: String,
    pub emergency_caller_sid: Option<String>,
    #[serde(default)]
    pub emergency_calling_enabled: bool,
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub sip_registration: bool,
    pub voice_fallback_method: Option<String>,
    pub voice_fallback_url: Option<String>,
    pub voice_method: Option<String>,
    pub voice_status_callback_method: Option<String>,
    pub voice_status_callback_url: Option<String>,
    pub voice_url: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_created: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date_updated: Option<DateTime<Utc>>,
}

/// Create and update parameters; `Omit` fields are left out of the request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SipDomainInput {
    pub domain_name: WriteIntent<String>,
    pub friendly_name: WriteIntent<String>,
    pub byoc_trunk_sid: WriteIntent<String>,
    pub secure: WriteIntent<bool>,
    pub sip_registration: WriteIntent<bool>,
    pub voice_url: WriteIntent<String>,
    pub voice_method: WriteIntent<String>,
    pub voice_fallback_url: WriteIntent<String>,
    pub voice_fallback_method: WriteIntent<String>,
    pub voice_status_callback_url: WriteIntent<String>,
    pub voice_status_callback_method: WriteIntent<String>,
    pub emergency_caller_sid: WriteIntent<String>,
    pub emergency_calling_enabled: WriteIntent<bool>,
}

impl SipDomainInput {
    pub fn form(&self) -> Form {
        Form::new()
            .intent("DomainName", &self.domain_name)
            .intent("FriendlyName", &self.friendly_name)
            .intent("ByocTrunkSid", &self.byoc_trunk_sid)
            .intent("Secure", &self.secure)
            .intent("SipRegistration", &self.sip_registration)
            .intent("VoiceUrl", &self.voice_url)
            .intent("VoiceMethod", &self.voice_method)
            .intent("VoiceFallbackUrl", &self.voice_fallback_url)
            .intent("VoiceFallbackMethod", &self.voice_fallback_method)
            .intent("VoiceStatusCallbackUrl", &self.voice_status_callback_url)
            .intent("VoiceStatusCallbackMethod", &self.voice_status_callback_method)
            .intent("EmergencyCallerSid", &self.emergency_caller_sid)
            .intent("EmergencyCallingEnabled", &self.emergency_calling_enabled)
    }
}

fn domains_path(account_sid: &str) -> String {
    format!("/2010-04-01/Accounts/{}/SIP/Domains", segment(account_sid))
}

fn domain_path(account_sid: &str, sid: &str) -> String {
    format!("{}/{}.json", domains_path(account_sid), segment(sid))
}

impl Client {
    pub async fn create_sip_domain(
        &self,
        account_sid: &str,
        input: &SipDomainInput,
    ) -> Result<SipDomain, ApiError> {
        let path = format!("{}.json", domains_path(account_sid));
        self.post(Product::Api, &path, &input.form()).await
    }

    pub async fn get_sip_domain(&self, account_sid: &str, sid: &str) -> Result<SipDomain, ApiError> {
        self.get(Product::Api, &domain_path(account_sid, sid)).await
    }

    pub async fn update_sip_domain(
        &self,
        account_sid: &str,
        sid: &str,
        input: &SipDomainInput,
    ) -> Result<SipDomain, ApiError> {
        self.post(Product::Api, &domain_path(account_sid, sid), &input.form())
            .await
    }

    pub async fn delete_sip_domain(&self, account_sid: &str, sid: &str) -> Result<(), ApiError> {
        self.delete(Product::Api, &domain_path(account_sid, sid)).await
    }
}

/// IP access control list mapped onto a domain's call authentication
#[derive(Debug, Clone, Deserialize)]
pub struct IpAccessControlListMapping {
    pub sid: String,
    pub account_sid: String,
    pub friendly_name: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_created: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date_updated: Option<DateTime<Utc>>,
}

impl Client {
    pub async fn get_sip_domain_ip_access_control_list_mapping(
        &self,
        account_sid: &str,
        domain_sid: &str,
        sid: &str,
    ) -> Result<IpAccessControlListMapping, ApiError> {
        let path = format!(
            "{}/{}/Auth/Calls/IpAccessControlListMappings/{}.json",
            domains_path(account_sid),
            segment(domain_sid),
            segment(sid)
        );
        self.get(Product::Api, &path).await
    }
}
