//! Autopilot task field resource; fields are immutable once created

use async_trait::async_trait;
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::validator::{StringLengthValidator, StringNotEmptyValidator};
use tfplug::{AttributePath, Config, Context, ImportTemplate, Resource, Result, State};

use crate::api::autopilot::TaskField;
use crate::api::Client;
use crate::state::{required, set_dates};
use crate::validation;

pub const TYPE_NAME: &str = "twilio_autopilot_task_field";

const IMPORT_TEMPLATE: ImportTemplate =
    ImportTemplate::new("/Assistants/{assistant_sid}/Tasks/{task_sid}/Fields/{sid}");

pub struct TaskFieldResource {
    client: Client,
}

impl TaskFieldResource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

pub fn schema() -> Schema {
    SchemaBuilder::new()
        .version(0)
        .description("Manages a field of an Autopilot task")
        .attribute(
            AttributeBuilder::new("sid", AttributeType::String)
                .computed()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("account_sid", AttributeType::String)
                .computed()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("assistant_sid", AttributeType::String)
                .description("The assistant the task belongs to")
                .required()
                .force_new()
                .validator(validation::ASSISTANT_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("task_sid", AttributeType::String)
                .description("The task the field belongs to")
                .required()
                .force_new()
                .validator(validation::AUTOPILOT_TASK_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("unique_name", AttributeType::String)
                .description("Unique name of the field within the task")
                .required()
                .force_new()
                .validator(StringLengthValidator::between(1, 64))
                .build(),
        )
        .attribute(
            AttributeBuilder::new("field_type", AttributeType::String)
                .description("Built-in field type or the SID of a custom field type")
                .required()
                .force_new()
                .validator(StringNotEmptyValidator)
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
        .attribute(
            AttributeBuilder::new("url", AttributeType::String)
                .computed()
                .build(),
        )
        .build()
}

fn field_state(field: &TaskField) -> Result<State> {
    let mut state = State::empty_object();
    state.set_id(field.sid.clone());
    state.set_string(&AttributePath::new("sid"), field.sid.clone())?;
    state.set_string(&AttributePath::new("account_sid"), field.account_sid.clone())?;
    state.set_string(&AttributePath::new("assistant_sid"), field.assistant_sid.clone())?;
    state.set_string(&AttributePath::new("task_sid"), field.task_sid.clone())?;
    state.set_string(&AttributePath::new("unique_name"), field.unique_name.clone())?;
    state.set_string(&AttributePath::new("field_type"), field.field_type.clone())?;
    state.set_string(&AttributePath::new("url"), field.url.clone())?;
    set_dates(&mut state, &field.date_created, field.date_updated.as_ref())?;
    Ok(state)
}

#[async_trait]
impl Resource for TaskFieldResource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn display_name(&self) -> &str {
        "Autopilot task field"
    }

    fn schema(&self) -> Schema {
        schema()
    }

    fn import_template(&self) -> Option<ImportTemplate> {
        Some(IMPORT_TEMPLATE)
    }

    async fn create(&self, _ctx: &Context, config: &Config) -> Result<State> {
        let field = self
            .client
            .create_task_field(
                &required(config, "assistant_sid")?,
                &required(config, "task_sid")?,
                &required(config, "unique_name")?,
                &required(config, "field_type")?,
            )
            .await?;

        let mut seed = State::empty_object();
        seed.set_id(field.sid);
        Ok(seed)
    }

    async fn read(&self, _ctx: &Context, state: &State) -> Result<State> {
        let field = self
            .client
            .get_task_field(
                &required(state, "assistant_sid")?,
                &required(state, "task_sid")?,
                &required(state, "id")?,
            )
            .await?;
        field_state(&field)
    }

    async fn delete(&self, _ctx: &Context, state: &State) -> Result<()> {
        self.client
            .delete_task_field(
                &required(state, "assistant_sid")?,
                &required(state, "task_sid")?,
                &required(state, "id")?,
            )
            .await?;
        Ok(())
    }
}
