//! Programmable Chat channel member resource

use async_trait::async_trait;
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::validator::JsonStringValidator;
use tfplug::{
    AttributePath, Changes, Config, Context, ImportTemplate, Resource, Result, State, WriteIntent,
};

use crate::api::chat::{ChannelMember, ChannelMemberInput};
use crate::api::error::chat_error;
use crate::api::Client;
use crate::state::{required, set_dates, timestamp};
use crate::validation;

pub const TYPE_NAME: &str = "twilio_chat_channel_member";

const IMPORT_TEMPLATE: ImportTemplate =
    ImportTemplate::new("/Services/{service_sid}/Channels/{channel_sid}/Members/{sid}");

pub struct ChatChannelMemberResource {
    client: Client,
}

impl ChatChannelMemberResource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

pub fn schema() -> Schema {
    SchemaBuilder::new()
        .version(0)
        .description("Manages a member of a Programmable Chat channel")
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
                .description("The chat service the channel belongs to")
                .required()
                .force_new()
                .validator(validation::CHAT_SERVICE_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("channel_sid", AttributeType::String)
                .description("The channel to add the member to")
                .required()
                .force_new()
                .validator(validation::CHANNEL_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("identity", AttributeType::String)
                .description("The identity of the user joining the channel")
                .required()
                .force_new()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("role_sid", AttributeType::String)
                .description("The role assigned to the member")
                .optional()
                .computed()
                .validator(validation::CHAT_ROLE_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("attributes", AttributeType::String)
                .description("JSON document of custom member attributes")
                .optional()
                .computed()
                .validator(JsonStringValidator)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("last_consumed_message_index", AttributeType::Number)
                .computed()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("last_consumption_timestamp", AttributeType::String)
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
        .attribute(
            AttributeBuilder::new("url", AttributeType::String)
                .computed()
                .build(),
        )
        .build()
}

fn member_state(member: &ChannelMember) -> Result<State> {
    let mut state = State::empty_object();
    state.set_id(member.sid.clone());
    state.set_string(&AttributePath::new("sid"), member.sid.clone())?;
    state.set_string(&AttributePath::new("account_sid"), member.account_sid.clone())?;
    state.set_string(&AttributePath::new("service_sid"), member.service_sid.clone())?;
    state.set_string(&AttributePath::new("channel_sid"), member.channel_sid.clone())?;
    state.set_string(&AttributePath::new("identity"), member.identity.clone())?;
    state.set_optional(&AttributePath::new("role_sid"), member.role_sid.clone())?;
    state.set_string(
        &AttributePath::new("attributes"),
        member.attributes.clone().unwrap_or_else(|| "{}".to_string()),
    )?;
    state.set_optional(
        &AttributePath::new("last_consumed_message_index"),
        member.last_consumed_message_index,
    )?;
    state.set_optional(
        &AttributePath::new("last_consumption_timestamp"),
        member.last_consumption_timestamp.as_ref().map(timestamp),
    )?;
    state.set_string(&AttributePath::new("url"), member.url.clone())?;
    set_dates(&mut state, &member.date_created, member.date_updated.as_ref())?;
    Ok(state)
}

#[async_trait]
impl Resource for ChatChannelMemberResource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn display_name(&self) -> &str {
        "chat channel member"
    }

    fn schema(&self) -> Schema {
        schema()
    }

    fn import_template(&self) -> Option<ImportTemplate> {
        Some(IMPORT_TEMPLATE)
    }

    async fn create(&self, _ctx: &Context, config: &Config) -> Result<State> {
        let changes = Changes::creating(config);
        let service_sid = changes.require_string("service_sid")?;
        let channel_sid = changes.require_string("channel_sid")?;
        let input = ChannelMemberInput {
            identity: changes.string("identity"),
            role_sid: changes.string_no_clear("role_sid"),
            attributes: changes.json("attributes"),
        };

        let member = self
            .client
            .create_channel_member(&service_sid, &channel_sid, &input)
            .await
            .map_err(chat_error)?;

        let mut seed = State::empty_object();
        seed.set_id(member.sid);
        Ok(seed)
    }

    async fn read(&self, _ctx: &Context, state: &State) -> Result<State> {
        let service_sid = required(state, "service_sid")?;
        let channel_sid = required(state, "channel_sid")?;
        let sid = required(state, "id")?;
        let member = self
            .client
            .get_channel_member(&service_sid, &channel_sid, &sid)
            .await
            .map_err(chat_error)?;
        member_state(&member)
    }

    async fn update(&self, _ctx: &Context, changes: &Changes<'_>) -> Result<()> {
        let service_sid = changes.require_string("service_sid")?;
        let channel_sid = changes.require_string("channel_sid")?;
        let sid = changes.id()?;
        // Role and attributes are server-assigned when unset, so removing
        // them from the configuration leaves the current values in place
        let input = ChannelMemberInput {
            role_sid: changes.string_no_clear("role_sid"),
            attributes: match changes.json("attributes") {
                WriteIntent::Clear => WriteIntent::Omit,
                intent => intent,
            },
            ..ChannelMemberInput::default()
        };

        self.client
            .update_channel_member(&service_sid, &channel_sid, &sid, &input)
            .await
            .map_err(chat_error)?;
        Ok(())
    }

    async fn delete(&self, _ctx: &Context, state: &State) -> Result<()> {
        let service_sid = required(state, "service_sid")?;
        let channel_sid = required(state, "channel_sid")?;
        let sid = required(state, "id")?;
        self.client
            .delete_channel_member(&service_sid, &channel_sid, &sid)
            .await
            .map_err(chat_error)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::api::test_helpers::{create_test_client, dynamic, TEST_ACCOUNT_SID};
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;
    use std::sync::Arc;
    use tfplug::request::{CreateRequest, ImportRequest, ReadRequest, UpdateRequest};
    use tfplug::ResourceReconciler;

    const SERVICE_SID: &str = "ISaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const CHANNEL_SID: &str = "CHaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const MEMBER_SID: &str = "MBaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    fn members_path() -> String {
        format!("/v2/Services/{}/Channels/{}/Members", SERVICE_SID, CHANNEL_SID)
    }

    fn member_path() -> String {
        format!("{}/{}", members_path(), MEMBER_SID)
    }

    fn member_body(attributes: &str) -> String {
        json!({
            "sid": MEMBER_SID,
            "account_sid": TEST_ACCOUNT_SID,
            "service_sid": SERVICE_SID,
            "channel_sid": CHANNEL_SID,
            "identity": "alice",
            "role_sid": "RLaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "attributes": attributes,
            "last_consumed_message_index": null,
            "last_consumption_timestamp": null,
            "date_created": "2021-03-02T10:00:00Z",
            "date_updated": "2021-03-02T11:00:00Z",
            "url": format!("https://chat.twilio.com{}", member_path())
        })
        .to_string()
    }

    fn reconciler(server: &ServerGuard) -> ResourceReconciler {
        ResourceReconciler::new(Arc::new(ChatChannelMemberResource::new(
            create_test_client(&server.url()),
        )))
    }

    fn member_config() -> Config {
        dynamic(json!({
            "service_sid": SERVICE_SID,
            "channel_sid": CHANNEL_SID,
            "identity": "alice"
        }))
    }

    #[tokio::test]
    async fn test_create_without_attributes_reads_back_server_default() {
        let mut server = Server::new_async().await;
        let create = server
            .mock("POST", members_path().as_str())
            .match_body(Matcher::Exact("Identity=alice".to_string()))
            .with_status(201)
            .with_body(member_body("{}"))
            .create_async()
            .await;
        server
            .mock("GET", member_path().as_str())
            .with_status(200)
            .with_body(member_body("{}"))
            .create_async()
            .await;

        let response = reconciler(&server)
            .create(CreateRequest {
                context: Context::new(),
                config: member_config(),
            })
            .await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        let state = response.state.unwrap();
        assert_eq!(
            state.get_string(&AttributePath::new("attributes")).unwrap(),
            "{}"
        );
        assert_eq!(
            state.get_string(&AttributePath::new("role_sid")).unwrap(),
            "RLaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
        );
        assert!(!state.has(&AttributePath::new("last_consumption_timestamp")));
        create.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_sends_normalized_attributes() {
        let mut server = Server::new_async().await;
        let update = server
            .mock("POST", member_path().as_str())
            .match_body(Matcher::UrlEncoded(
                "Attributes".to_string(),
                r#"{"team":"blue"}"#.to_string(),
            ))
            .with_status(200)
            .with_body(member_body(r#"{"team":"blue"}"#))
            .create_async()
            .await;
        server
            .mock("GET", member_path().as_str())
            .with_status(200)
            .with_body(member_body(r#"{"team":"blue"}"#))
            .create_async()
            .await;

        let prior = dynamic(json!({
            "id": MEMBER_SID,
            "service_sid": SERVICE_SID,
            "channel_sid": CHANNEL_SID,
            "identity": "alice",
            "attributes": "{}"
        }));
        let mut config = member_config();
        config
            .set_string(
                &AttributePath::new("attributes"),
                r#"{ "team": "blue" }"#.to_string(),
            )
            .unwrap();

        let response = reconciler(&server)
            .update(UpdateRequest {
                context: Context::new(),
                config,
                current_state: prior,
            })
            .await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_service_is_treated_as_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", member_path().as_str())
            .with_status(403)
            .with_body(r#"{"code": 20403, "message": "Service instance not found", "status": 403}"#)
            .create_async()
            .await;

        let response = reconciler(&server)
            .read(ReadRequest {
                context: Context::new(),
                current_state: dynamic(json!({
                    "id": MEMBER_SID,
                    "service_sid": SERVICE_SID,
                    "channel_sid": CHANNEL_SID
                })),
            })
            .await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        assert!(response.state.is_none());
    }

    #[tokio::test]
    async fn test_other_forbidden_errors_fail_the_read() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", member_path().as_str())
            .with_status(403)
            .with_body(r#"{"code": 20403, "message": "Forbidden", "status": 403}"#)
            .create_async()
            .await;

        let response = reconciler(&server)
            .read(ReadRequest {
                context: Context::new(),
                current_state: dynamic(json!({
                    "id": MEMBER_SID,
                    "service_sid": SERVICE_SID,
                    "channel_sid": CHANNEL_SID
                })),
            })
            .await;

        assert_eq!(response.diagnostics.len(), 1);
        assert_eq!(
            response.diagnostics[0].summary,
            "Failed to read chat channel member"
        );
    }

    #[tokio::test]
    async fn test_import_populates_parent_scopes() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", member_path().as_str())
            .with_status(200)
            .with_body(member_body("{}"))
            .create_async()
            .await;

        let response = reconciler(&server)
            .import(ImportRequest {
                context: Context::new(),
                id: format!(
                    "/Services/{}/Channels/{}/Members/{}",
                    SERVICE_SID, CHANNEL_SID, MEMBER_SID
                ),
            })
            .await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        let state = response.state.unwrap();
        assert_eq!(
            state.get_string(&AttributePath::new("channel_sid")).unwrap(),
            CHANNEL_SID
        );
        assert_eq!(state.id().as_deref(), Some(MEMBER_SID));
    }
}
