//! Lists the short codes attached to a Proxy service

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;
use tfplug::context::Timeouts;
use tfplug::schema::{
    Attribute, AttributeBuilder, AttributeType, NestedBlockBuilder, Schema, SchemaBuilder,
};
use tfplug::{AttributePath, Config, Context, DataSource, Dynamic, Result, State, TfplugError};

use crate::api::proxy::{ShortCode, ShortCodeCapabilities};
use crate::api::Client;
use crate::state::{object, required, timestamp};
use crate::validation;

pub const TYPE_NAME: &str = "twilio_proxy_short_codes";

const CAPABILITY_NAMES: [&str; 13] = [
    "fax_inbound",
    "fax_outbound",
    "mms_inbound",
    "mms_outbound",
    "restriction_fax_domestic",
    "restriction_mms_domestic",
    "restriction_sms_domestic",
    "restriction_voice_domestic",
    "sip_trunking",
    "sms_inbound",
    "sms_outbound",
    "voice_inbound",
    "voice_outbound",
];

pub struct ShortCodesDataSource {
    client: Client,
}

impl ShortCodesDataSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn computed(name: &str, attribute_type: AttributeType) -> Attribute {
    AttributeBuilder::new(name, attribute_type).computed().build()
}

pub fn schema() -> Schema {
    let capabilities = AttributeType::Object(
        CAPABILITY_NAMES
            .iter()
            .map(|name| (name.to_string(), AttributeType::Bool))
            .collect(),
    );

    SchemaBuilder::new()
        .version(0)
        .description("Lists the short codes of a Proxy service")
        .attribute(
            AttributeBuilder::new("service_sid", AttributeType::String)
                .description("The Proxy service to list short codes for")
                .required()
                .validator(validation::PROXY_SERVICE_SID)
                .build(),
        )
        .attribute(computed("account_sid", AttributeType::String))
        .block(
            NestedBlockBuilder::list("short_codes")
                .computed()
                .attribute(computed("sid", AttributeType::String))
                .attribute(computed("is_reserved", AttributeType::Bool))
                .attribute(computed(
                    "capabilities",
                    AttributeType::List(Box::new(capabilities)),
                ))
                .attribute(computed("short_code", AttributeType::String))
                .attribute(computed("iso_country", AttributeType::String))
                .attribute(computed("date_created", AttributeType::String))
                .attribute(computed("date_updated", AttributeType::String))
                .attribute(computed("url", AttributeType::String))
                .build(),
        )
        .build()
}

fn capabilities_object(capabilities: &ShortCodeCapabilities) -> Dynamic {
    let flags = [
        capabilities.fax_inbound,
        capabilities.fax_outbound,
        capabilities.mms_inbound,
        capabilities.mms_outbound,
        capabilities.restriction_fax_domestic,
        capabilities.restriction_mms_domestic,
        capabilities.restriction_sms_domestic,
        capabilities.restriction_voice_domestic,
        capabilities.sip_trunking,
        capabilities.sms_inbound,
        capabilities.sms_outbound,
        capabilities.voice_inbound,
        capabilities.voice_outbound,
    ];
    Dynamic::Map(
        CAPABILITY_NAMES
            .iter()
            .zip(flags)
            .map(|(name, flag)| (name.to_string(), Dynamic::Bool(flag)))
            .collect::<BTreeMap<_, _>>(),
    )
}

fn short_code_object(short_code: &ShortCode) -> Dynamic {
    object([
        ("sid", Some(short_code.sid.clone().into())),
        ("is_reserved", Some(short_code.is_reserved.into())),
        (
            "capabilities",
            short_code
                .capabilities
                .as_ref()
                .map(|c| Dynamic::List(vec![capabilities_object(c)])),
        ),
        ("short_code", Some(short_code.short_code.clone().into())),
        ("iso_country", short_code.iso_country.clone().map(Into::into)),
        ("date_created", Some(timestamp(&short_code.date_created))),
        ("date_updated", short_code.date_updated.as_ref().map(timestamp)),
        ("url", Some(short_code.url.clone().into())),
    ])
}

#[async_trait]
impl DataSource for ShortCodesDataSource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn display_name(&self) -> &str {
        "proxy short codes"
    }

    fn schema(&self) -> Schema {
        schema()
    }

    fn timeouts(&self) -> Timeouts {
        Timeouts {
            read: Duration::from_secs(10 * 60),
            ..Timeouts::default()
        }
    }

    async fn read(&self, _ctx: &Context, config: &Config) -> Result<State> {
        let service_sid = required(config, "service_sid")?;

        let short_codes = self
            .client
            .list_proxy_short_codes(&service_sid)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    TfplugError::NotFound(format!(
                        "No short codes were found for proxy service with sid ({})",
                        service_sid
                    ))
                } else {
                    e.into()
                }
            })?;

        let mut state = State::empty_object();
        state.set_id(service_sid.clone());
        state.set_string(&AttributePath::new("service_sid"), service_sid)?;
        // Every short code carries the owning account
        if let Some(first) = short_codes.first() {
            state.set_string(&AttributePath::new("account_sid"), first.account_sid.clone())?;
        }
        state.set_list(
            &AttributePath::new("short_codes"),
            short_codes.iter().map(short_code_object).collect(),
        )?;
        Ok(state)
    }
}
