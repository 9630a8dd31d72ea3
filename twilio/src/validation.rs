//! SID formats accepted by resource and data source attributes

use tfplug::validator::{cached_regex, validate_pattern, SidValidator, Validator};
use tfplug::{AttributePath, Diagnostic, Dynamic};

pub const ACCOUNT_SID: SidValidator = SidValidator::new("AC");
pub const API_KEY_SID: SidValidator = SidValidator::new("SK");
pub const ASSISTANT_SID: SidValidator = SidValidator::new("UA");
pub const AUTOPILOT_MODEL_BUILD_SID: SidValidator = SidValidator::new("UG");
pub const AUTOPILOT_TASK_SID: SidValidator = SidValidator::new("UD");
pub const BYOC_TRUNK_SID: SidValidator = SidValidator::new("BY");
pub const CHANNEL_SID: SidValidator = SidValidator::new("CH");
pub const CHAT_ROLE_SID: SidValidator = SidValidator::new("RL");
/// Chat and Conversations services share the prefix
pub const CHAT_SERVICE_SID: SidValidator = SidValidator::new("IS");
/// Conversations reuse the channel prefix
pub const CONVERSATION_SID: SidValidator = SidValidator::new("CH");
pub const CREDENTIAL_SID: SidValidator = SidValidator::new("CR");
pub const FLEX_PLUGIN_SID: SidValidator = SidValidator::new("FP");
pub const IP_ACCESS_CONTROL_LIST_SID: SidValidator = SidValidator::new("AL");
pub const PHONE_NUMBER_SID: SidValidator = SidValidator::new("PN");
pub const PROXY_SERVICE_SID: SidValidator = SidValidator::new("KS");
pub const SERVERLESS_ENVIRONMENT_SID: SidValidator = SidValidator::new("ZE");
pub const SERVERLESS_SERVICE_SID: SidValidator = SidValidator::new("ZS");
pub const SIP_DOMAIN_SID: SidValidator = SidValidator::new("SD");
pub const SIP_TRUNK_SID: SidValidator = SidValidator::new("TK");
pub const TASKROUTER_WORKSPACE_SID: SidValidator = SidValidator::new("WS");

pub const SIP_DOMAIN_NAME_PATTERN: &str = r"^[a-zA-Z0-9-.]+\.sip\.twilio\.com$";

/// Domain names of the form `<label>.sip.twilio.com`
pub struct SipDomainNameValidator;

impl SipDomainNameValidator {
    pub fn is_valid(&self, value: &str) -> bool {
        cached_regex(SIP_DOMAIN_NAME_PATTERN).is_ok_and(|regex| regex.is_match(value))
    }
}

impl Validator for SipDomainNameValidator {
    fn description(&self) -> String {
        format!("string matching {}", SIP_DOMAIN_NAME_PATTERN)
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        validate_pattern(SIP_DOMAIN_NAME_PATTERN, value, path, diagnostics);
    }
}
