//! Looks up an Autopilot model build by SID or unique name

use async_trait::async_trait;
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::{AttributePath, Config, Context, DataSource, Result, State, TfplugError};

use crate::api::autopilot::ModelBuild;
use crate::api::Client;
use crate::state::{optional, required, set_dates};
use crate::validation;

pub const TYPE_NAME: &str = "twilio_autopilot_model_build";

pub struct ModelBuildDataSource {
    client: Client,
}

impl ModelBuildDataSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

pub fn schema() -> Schema {
    let mut builder = SchemaBuilder::new()
        .version(0)
        .description("Looks up an Autopilot model build")
        .attribute(
            AttributeBuilder::new("sid", AttributeType::String)
                .optional()
                .computed()
                .validator(validation::AUTOPILOT_MODEL_BUILD_SID)
                .exactly_one_of(&["sid", "unique_name"])
                .build(),
        )
        .attribute(
            AttributeBuilder::new("unique_name", AttributeType::String)
                .optional()
                .computed()
                .exactly_one_of(&["sid", "unique_name"])
                .build(),
        )
        .attribute(
            AttributeBuilder::new("assistant_sid", AttributeType::String)
                .required()
                .validator(validation::ASSISTANT_SID)
                .build(),
        );

    for (name, attribute_type) in [
        ("account_sid", AttributeType::String),
        ("status", AttributeType::String),
        ("build_duration", AttributeType::Number),
        ("error_code", AttributeType::Number),
        ("date_created", AttributeType::String),
        ("date_updated", AttributeType::String),
        ("url", AttributeType::String),
    ] {
        builder = builder.attribute(AttributeBuilder::new(name, attribute_type).computed().build());
    }

    builder.build()
}

fn build_state(build: ModelBuild) -> Result<State> {
    let mut state = State::empty_object();
    state.set_id(build.sid.clone());
    state.set_string(&AttributePath::new("sid"), build.sid)?;
    state.set_string(&AttributePath::new("account_sid"), build.account_sid)?;
    state.set_string(&AttributePath::new("assistant_sid"), build.assistant_sid)?;
    state.set_string(&AttributePath::new("unique_name"), build.unique_name)?;
    state.set_string(&AttributePath::new("status"), build.status)?;
    state.set_optional(&AttributePath::new("build_duration"), build.build_duration)?;
    state.set_optional(&AttributePath::new("error_code"), build.error_code)?;
    state.set_string(&AttributePath::new("url"), build.url)?;
    set_dates(&mut state, &build.date_created, build.date_updated.as_ref())?;
    Ok(state)
}

#[async_trait]
impl DataSource for ModelBuildDataSource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn display_name(&self) -> &str {
        "Autopilot model build"
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn read(&self, _ctx: &Context, config: &Config) -> Result<State> {
        let assistant_sid = required(config, "assistant_sid")?;
        let identifier = optional(config, "sid")
            .or_else(|| optional(config, "unique_name"))
            .ok_or_else(|| TfplugError::MissingAttribute("sid".to_string()))?;

        let build = self
            .client
            .get_model_build(&assistant_sid, &identifier)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    TfplugError::NotFound(format!(
                        "Model build with sid/ unique name ({}) was not found for assistant with sid ({})",
                        identifier, assistant_sid
                    ))
                } else {
                    e.into()
                }
            })?;

        build_state(build)
    }
}
