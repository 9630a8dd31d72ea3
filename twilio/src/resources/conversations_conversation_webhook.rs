//! Conversations webhook scoped to a single conversation

use async_trait::async_trait;
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::validator::{StringInSliceValidator, UrlValidator};
use tfplug::{
    AttributePath, Changes, Config, Context, ImportTemplate, Resource, Result, State, WriteIntent,
};

use crate::api::conversations::{ConversationWebhook, ConversationWebhookInput};
use crate::api::Client;
use crate::state::{required, set_dates};
use crate::validation;

pub const TYPE_NAME: &str = "twilio_conversations_conversation_webhook";

const IMPORT_TEMPLATE: ImportTemplate = ImportTemplate::new(
    "/Services/{service_sid}/Conversations/{conversation_sid}/Webhooks/{sid}",
);

pub struct ConversationWebhookResource {
    client: Client,
}

impl ConversationWebhookResource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

pub fn schema() -> Schema {
    SchemaBuilder::new()
        .version(0)
        .description("Manages a webhook attached to a single conversation")
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
            AttributeBuilder::new("service_sid", AttributeType::String)
                .description("The conversation service the conversation belongs to")
                .required()
                .force_new()
                .validator(validation::CHAT_SERVICE_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("conversation_sid", AttributeType::String)
                .description("The conversation the webhook is attached to")
                .required()
                .force_new()
                .validator(validation::CONVERSATION_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("target", AttributeType::String)
                .computed()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("method", AttributeType::String)
                .description("HTTP method used to call the webhook URL")
                .optional()
                .default("POST")
                .validator(StringInSliceValidator::new(&["GET", "POST"]))
                .build(),
        )
        .attribute(
            AttributeBuilder::new("webhook_url", AttributeType::String)
                .description("URL called for the filtered events")
                .required()
                .validator(UrlValidator)
                .build(),
        )
        .attribute(
            AttributeBuilder::new(
                "filters",
                AttributeType::List(Box::new(AttributeType::String)),
            )
            .description("Events that trigger the webhook")
            .required()
            .build(),
        )
        .attribute(
            AttributeBuilder::new("replay_after", AttributeType::Number)
                .description("Message index after which existing messages are replayed")
                .optional()
                .force_new()
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

fn webhook_input(changes: &Changes<'_>) -> ConversationWebhookInput {
    ConversationWebhookInput {
        url: changes.string_no_clear("webhook_url"),
        method: changes.string_no_clear("method"),
        filters: changes.string_list("filters"),
        replay_after: if changes.is_create() {
            changes.int("replay_after")
        } else {
            WriteIntent::Omit
        },
    }
}

fn webhook_state(webhook: &ConversationWebhook) -> Result<State> {
    let configuration = &webhook.configuration;
    let mut state = State::empty_object();
    state.set_id(webhook.sid.clone());
    state.set_string(&AttributePath::new("sid"), webhook.sid.clone())?;
    state.set_string(&AttributePath::new("account_sid"), webhook.account_sid.clone())?;
    state.set_string(
        &AttributePath::new("service_sid"),
        webhook.chat_service_sid.clone(),
    )?;
    state.set_string(
        &AttributePath::new("conversation_sid"),
        webhook.conversation_sid.clone(),
    )?;
    state.set_string(&AttributePath::new("target"), webhook.target.clone())?;
    state.set_optional(&AttributePath::new("webhook_url"), configuration.url.clone())?;
    state.set_optional(&AttributePath::new("method"), configuration.method.clone())?;
    state.set_string_list(&AttributePath::new("filters"), configuration.filters.clone())?;
    state.set_optional(&AttributePath::new("replay_after"), configuration.replay_after)?;
    state.set_string(&AttributePath::new("url"), webhook.url.clone())?;
    set_dates(&mut state, &webhook.date_created, webhook.date_updated.as_ref())?;
    Ok(state)
}

#[async_trait]
impl Resource for ConversationWebhookResource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn display_name(&self) -> &str {
        "conversation webhook"
    }

    fn schema(&self) -> Schema {
        schema()
    }

    fn import_template(&self) -> Option<ImportTemplate> {
        Some(IMPORT_TEMPLATE)
    }

    async fn create(&self, _ctx: &Context, config: &Config) -> Result<State> {
        let changes = Changes::creating(config);
        let webhook = self
            .client
            .create_conversation_webhook(
                &changes.require_string("service_sid")?,
                &changes.require_string("conversation_sid")?,
                &webhook_input(&changes),
            )
            .await?;

        let mut seed = State::empty_object();
        seed.set_id(webhook.sid);
        Ok(seed)
    }

    async fn read(&self, _ctx: &Context, state: &State) -> Result<State> {
        let webhook = self
            .client
            .get_conversation_webhook(
                &required(state, "service_sid")?,
                &required(state, "conversation_sid")?,
                &required(state, "id")?,
            )
            .await?;
        webhook_state(&webhook)
    }

    async fn update(&self, _ctx: &Context, changes: &Changes<'_>) -> Result<()> {
        self.client
            .update_conversation_webhook(
                &changes.require_string("service_sid")?,
                &changes.require_string("conversation_sid")?,
                &changes.id()?,
                &webhook_input(changes),
            )
            .await?;
        Ok(())
    }

    async fn delete(&self, _ctx: &Context, state: &State) -> Result<()> {
        self.client
            .delete_conversation_webhook(
                &required(state, "service_sid")?,
                &required(state, "conversation_sid")?,
                &required(state, "id")?,
            )
            .await?;
        Ok(())
    }
}
