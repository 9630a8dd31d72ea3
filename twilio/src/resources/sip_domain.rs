//! SIP domain resource

use async_trait::async_trait;
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType, NestedBlockBuilder, Schema, SchemaBuilder};
use tfplug::validator::{StringInSliceValidator, UrlValidator};
use tfplug::{AttributePath, Changes, Config, Context, ImportTemplate, Resource, Result, State};

use crate::api::sip::{SipDomain, SipDomainInput};
use crate::api::Client;
use crate::state::{object, required, set_dates};
use crate::validation::{self, SipDomainNameValidator};

pub const TYPE_NAME: &str = "twilio_sip_domain";

const IMPORT_TEMPLATE: ImportTemplate = ImportTemplate::new("/Accounts/{account_sid}/SIP/Domains/{sid}");

pub struct SipDomainResource {
    client: Client,
}

impl SipDomainResource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn http_method(name: &str, description: &str) -> Attribute {
    AttributeBuilder::new(name, AttributeType::String)
        .description(description)
        .optional()
        .default("POST")
        .validator(StringInSliceValidator::new(&["GET", "POST"]))
        .build()
}

fn callback_url(name: &str, description: &str) -> Attribute {
    AttributeBuilder::new(name, AttributeType::String)
        .description(description)
        .optional()
        .validator(UrlValidator)
        .build()
}

pub fn schema() -> Schema {
    SchemaBuilder::new()
        .version(0)
        .description("Manages a SIP domain")
        .attribute(
            AttributeBuilder::new("sid", AttributeType::String)
                .description("The SID of the SIP domain")
                .computed()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("account_sid", AttributeType::String)
                .description("The account the SIP domain belongs to")
                .required()
                .force_new()
                .validator(validation::ACCOUNT_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("domain_name", AttributeType::String)
                .description("Unique address ending in sip.twilio.com")
                .required()
                .validator(SipDomainNameValidator)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("friendly_name", AttributeType::String)
                .description("The friendly name of the SIP domain")
                .optional()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("byoc_trunk_sid", AttributeType::String)
                .description("The BYOC trunk calls are routed through")
                .optional()
                .validator(validation::BYOC_TRUNK_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("secure", AttributeType::Bool)
                .description("Whether secure SIP is enabled")
                .optional()
                .default(false)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("sip_registration", AttributeType::Bool)
                .description("Whether SIP endpoints may register with the domain")
                .optional()
                .default(false)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("auth_type", AttributeType::String)
                .description("The authentication types configured for the domain")
                .computed()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("date_created", AttributeType::String)
                .computed()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("date_updated", AttributeType::String)
                .computed()
                .build(),
        )
        .block(
            NestedBlockBuilder::list("voice")
                .description("Voice call handling")
                .max_items(1)
                .computed()
                .attribute(callback_url(
                    "status_callback_url",
                    "URL called with call status changes",
                ))
                .attribute(http_method(
                    "status_callback_method",
                    "HTTP method used for the status callback",
                ))
                .attribute(callback_url(
                    "fallback_url",
                    "URL called when the voice URL fails",
                ))
                .attribute(http_method(
                    "fallback_method",
                    "HTTP method used for the fallback URL",
                ))
                .attribute(callback_url("url", "URL called when a call arrives"))
                .attribute(http_method("method", "HTTP method used for the voice URL"))
                .build(),
        )
        .block(
            NestedBlockBuilder::list("emergency")
                .description("Emergency calling")
                .max_items(1)
                .computed()
                .attribute(
                    AttributeBuilder::new("calling_enabled", AttributeType::Bool)
                        .description("Whether emergency calling is enabled")
                        .optional()
                        .default(false)
                        .build(),
                )
                .attribute(
                    AttributeBuilder::new("caller_sid", AttributeType::String)
                        .description("Phone number used as the emergency caller ID")
                        .optional()
                        .validator(validation::PHONE_NUMBER_SID)
                        .build(),
                )
                .build(),
        )
        .build()
}

/// Voice and emergency fields are only sent when their block is configured
fn domain_input(changes: &Changes<'_>) -> SipDomainInput {
    let mut input = SipDomainInput {
        domain_name: changes.string_no_clear("domain_name"),
        friendly_name: changes.string("friendly_name"),
        byoc_trunk_sid: changes.string("byoc_trunk_sid"),
        secure: changes.bool("secure"),
        sip_registration: changes.bool("sip_registration"),
        ..SipDomainInput::default()
    };

    if changes.is_set("voice") {
        input.voice_url = changes.string("voice.0.url");
        input.voice_method = changes.string_no_clear("voice.0.method");
        input.voice_fallback_url = changes.string("voice.0.fallback_url");
        input.voice_fallback_method = changes.string_no_clear("voice.0.fallback_method");
        input.voice_status_callback_url = changes.string("voice.0.status_callback_url");
        input.voice_status_callback_method =
            changes.string_no_clear("voice.0.status_callback_method");
    }

    if changes.is_set("emergency") {
        input.emergency_caller_sid = changes.string("emergency.0.caller_sid");
        input.emergency_calling_enabled = changes.bool("emergency.0.calling_enabled");
    }

    input
}

fn domain_state(domain: &SipDomain) -> Result<State> {
    let mut state = State::empty_object();
    state.set_id(domain.sid.clone());
    state.set_string(&AttributePath::new("sid"), domain.sid.clone())?;
    state.set_string(&AttributePath::new("account_sid"), domain.account_sid.clone())?;
    state.set_string(&AttributePath::new("domain_name"), domain.domain_name.clone())?;
    state.set_optional(&AttributePath::new("friendly_name"), domain.friendly_name.clone())?;
    state.set_optional(&AttributePath::new("byoc_trunk_sid"), domain.byoc_trunk_sid.clone())?;
    state.set_optional(&AttributePath::new("auth_type"), domain.auth_type.clone())?;
    state.set_bool(&AttributePath::new("secure"), domain.secure)?;
    state.set_bool(&AttributePath::new("sip_registration"), domain.sip_registration)?;

    let voice = object([
        ("url", domain.voice_url.clone().map(Into::into)),
        ("method", domain.voice_method.clone().map(Into::into)),
        ("fallback_url", domain.voice_fallback_url.clone().map(Into::into)),
        ("fallback_method", domain.voice_fallback_method.clone().map(Into::into)),
        (
            "status_callback_url",
            domain.voice_status_callback_url.clone().map(Into::into),
        ),
        (
            "status_callback_method",
            domain.voice_status_callback_method.clone().map(Into::into),
        ),
    ]);
    state.set_list(&AttributePath::new("voice"), vec![voice])?;

    let emergency = object([
        (
            "calling_enabled",
            Some(domain.emergency_calling_enabled.into()),
        ),
        ("caller_sid", domain.emergency_caller_sid.clone().map(Into::into)),
    ]);
    state.set_list(&AttributePath::new("emergency"), vec![emergency])?;

    set_dates(&mut state, &domain.date_created, domain.date_updated.as_ref())?;
    Ok(state)
}

#[async_trait]
impl Resource for SipDomainResource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn display_name(&self) -> &str {
        "SIP domain"
    }

    fn schema(&self) -> Schema {
        schema()
    }

    fn import_template(&self) -> Option<ImportTemplate> {
        Some(IMPORT_TEMPLATE)
    }

    async fn create(&self, _ctx: &Context, config: &Config) -> Result<State> {
        let changes = Changes::creating(config);
        let account_sid = changes.require_string("account_sid")?;
        let domain = self
            .client
            .create_sip_domain(&account_sid, &domain_input(&changes))
            .await?;

        let mut seed = State::empty_object();
        seed.set_id(domain.sid);
        Ok(seed)
    }

    async fn read(&self, _ctx: &Context, state: &State) -> Result<State> {
        let account_sid = required(state, "account_sid")?;
        let sid = required(state, "id")?;
        let domain = self.client.get_sip_domain(&account_sid, &sid).await?;
        domain_state(&domain)
    }

    async fn update(&self, _ctx: &Context, changes: &Changes<'_>) -> Result<()> {
        let account_sid = changes.require_string("account_sid")?;
        let sid = changes.id()?;
        self.client
            .update_sip_domain(&account_sid, &sid, &domain_input(changes))
            .await?;
        Ok(())
    }

    async fn delete(&self, _ctx: &Context, state: &State) -> Result<()> {
        let account_sid = required(state, "account_sid")?;
        let sid = required(state, "id")?;
        self.client.delete_sip_domain(&account_sid, &sid).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "./sip_domain_test.rs"]
mod sip_domain_test;
