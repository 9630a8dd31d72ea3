//! Lists the workflows of a TaskRouter workspace

use async_trait::async_trait;
use std::time::Duration;
use tfplug::context::Timeouts;
use tfplug::schema::{AttributeBuilder, AttributeType, NestedBlockBuilder, Schema, SchemaBuilder};
use tfplug::{AttributePath, Config, Context, DataSource, Dynamic, Result, State, TfplugError};

use crate::api::taskrouter::Workflow;
use crate::api::Client;
use crate::state::{object, optional, required, timestamp};
use crate::validation;

pub const TYPE_NAME: &str = "twilio_taskrouter_workflows";

pub struct WorkflowsDataSource {
    client: Client,
}

impl WorkflowsDataSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn computed(name: &str, attribute_type: AttributeType) -> tfplug::schema::Attribute {
    AttributeBuilder::new(name, attribute_type).computed().build()
}

pub fn schema() -> Schema {
    SchemaBuilder::new()
        .version(0)
        .description("Lists the workflows of a TaskRouter workspace")
        .attribute(
            AttributeBuilder::new("workspace_sid", AttributeType::String)
                .description("The workspace to list workflows for")
                .required()
                .validator(validation::TASKROUTER_WORKSPACE_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("friendly_name", AttributeType::String)
                .description("Only list workflows with this friendly name")
                .optional()
                .build(),
        )
        .attribute(computed("account_sid", AttributeType::String))
        .block(
            NestedBlockBuilder::list("workflows")
                .computed()
                .attribute(computed("sid", AttributeType::String))
                .attribute(computed("friendly_name", AttributeType::String))
                .attribute(computed(
                    "fallback_assignment_callback_url",
                    AttributeType::String,
                ))
                .attribute(computed("assignment_callback_url", AttributeType::String))
                .attribute(computed("task_reservation_timeout", AttributeType::Number))
                .attribute(computed("document_content_type", AttributeType::String))
                .attribute(computed("configuration", AttributeType::String))
                .attribute(computed("date_created", AttributeType::String))
                .attribute(computed("date_updated", AttributeType::String))
                .attribute(computed("url", AttributeType::String))
                .build(),
        )
        .build()
}

fn workflow_object(workflow: &Workflow) -> Dynamic {
    object([
        ("sid", Some(workflow.sid.clone().into())),
        ("friendly_name", Some(workflow.friendly_name.clone().into())),
        (
            "fallback_assignment_callback_url",
            workflow.fallback_assignment_callback_url.clone().map(Into::into),
        ),
        (
            "assignment_callback_url",
            workflow.assignment_callback_url.clone().map(Into::into),
        ),
        (
            "task_reservation_timeout",
            workflow.task_reservation_timeout.map(Into::into),
        ),
        (
            "document_content_type",
            workflow.document_content_type.clone().map(Into::into),
        ),
        ("configuration", Some(workflow.configuration.clone().into())),
        ("date_created", Some(timestamp(&workflow.date_created))),
        ("date_updated", workflow.date_updated.as_ref().map(timestamp)),
        ("url", Some(workflow.url.clone().into())),
    ])
}

#[async_trait]
impl DataSource for WorkflowsDataSource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn display_name(&self) -> &str {
        "TaskRouter workflows"
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
        let workspace_sid = required(config, "workspace_sid")?;
        let friendly_name = optional(config, "friendly_name");

        let workflows = self
            .client
            .list_workflows(&workspace_sid, friendly_name.as_deref())
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    TfplugError::NotFound(format!(
                        "No workflows were found for taskrouter workspace with sid ({})",
                        workspace_sid
                    ))
                } else {
                    e.into()
                }
            })?;
        tracing::debug!(
            "Listed {} workflows for workspace {}",
            workflows.len(),
            workspace_sid
        );

        let mut state = State::empty_object();
        state.set_id(workspace_sid.clone());
        state.set_string(&AttributePath::new("workspace_sid"), workspace_sid)?;
        state.set_string(
            &AttributePath::new("account_sid"),
            self.client.account_sid().to_string(),
        )?;
        state.set_list(
            &AttributePath::new("workflows"),
            workflows.iter().map(workflow_object).collect(),
        )?;
        Ok(state)
    }
}
