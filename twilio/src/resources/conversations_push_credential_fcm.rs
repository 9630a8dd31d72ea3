//! Firebase Cloud Messaging credential for Conversations push notifications

use async_trait::async_trait;
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::validator::{StringLengthValidator, StringNotEmptyValidator};
use tfplug::{AttributePath, Changes, Config, Context, ImportTemplate, Resource, Result, State};

use crate::api::conversations::{PushCredential, PushCredentialInput};
use crate::api::Client;
use crate::state::{required, set_dates};

pub const TYPE_NAME: &str = "twilio_conversations_push_credential_fcm";

const CREDENTIAL_TYPE: &str = "fcm";

const IMPORT_TEMPLATE: ImportTemplate = ImportTemplate::new("/Credentials/{sid}");

pub struct PushCredentialFcmResource {
    client: Client,
}

impl PushCredentialFcmResource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

pub fn schema() -> Schema {
    SchemaBuilder::new()
        .version(0)
        .description("Manages an FCM push credential for Conversations")
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
            AttributeBuilder::new("friendly_name", AttributeType::String)
                .required()
                .validator(StringLengthValidator::between(1, 64))
                .build(),
        )
        .attribute(
            AttributeBuilder::new("secret", AttributeType::String)
                .description("The FCM server key")
                .required()
                .sensitive()
                .validator(StringNotEmptyValidator)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("type", AttributeType::String)
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

fn credential_state(credential: &PushCredential) -> Result<State> {
    let mut state = State::empty_object();
    state.set_id(credential.sid.clone());
    state.set_string(&AttributePath::new("sid"), credential.sid.clone())?;
    state.set_string(
        &AttributePath::new("account_sid"),
        credential.account_sid.clone(),
    )?;
    state.set_optional(
        &AttributePath::new("friendly_name"),
        credential.friendly_name.clone(),
    )?;
    state.set_string(
        &AttributePath::new("type"),
        credential.credential_type.clone(),
    )?;
    state.set_string(&AttributePath::new("url"), credential.url.clone())?;
    set_dates(&mut state, &credential.date_created, credential.date_updated.as_ref())?;
    Ok(state)
}

fn credential_input(changes: &Changes<'_>) -> PushCredentialInput {
    PushCredentialInput {
        friendly_name: changes.string_no_clear("friendly_name"),
        secret: changes.string_no_clear("secret"),
    }
}

#[async_trait]
impl Resource for PushCredentialFcmResource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn display_name(&self) -> &str {
        "conversations push credential"
    }

    fn schema(&self) -> Schema {
        schema()
    }

    fn import_template(&self) -> Option<ImportTemplate> {
        Some(IMPORT_TEMPLATE)
    }

    async fn create(&self, _ctx: &Context, config: &Config) -> Result<State> {
        let input = credential_input(&Changes::creating(config));
        let credential = self
            .client
            .create_push_credential(CREDENTIAL_TYPE, &input)
            .await?;

        let mut seed = State::empty_object();
        seed.set_id(credential.sid);
        Ok(seed)
    }

    async fn read(&self, _ctx: &Context, state: &State) -> Result<State> {
        let credential = self
            .client
            .get_push_credential(&required(state, "id")?)
            .await?;
        credential_state(&credential)
    }

    async fn update(&self, _ctx: &Context, changes: &Changes<'_>) -> Result<()> {
        self.client
            .update_push_credential(&changes.id()?, &credential_input(changes))
            .await?;
        Ok(())
    }

    async fn delete(&self, _ctx: &Context, state: &State) -> Result<()> {
        self.client
            .delete_push_credential(&required(state, "id")?)
            .await?;
        Ok(())
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
    use tfplug::request::{CreateRequest, ImportRequest, UpdateRequest};
    use tfplug::ResourceReconciler;

    const CREDENTIAL_SID: &str = "CRbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    fn credential_path() -> String {
        format!("/v1/Credentials/{}", CREDENTIAL_SID)
    }

    fn credential_body() -> String {
        json!({
            "sid": CREDENTIAL_SID,
            "account_sid": TEST_ACCOUNT_SID,
            "friendly_name": "android",
            "type": "fcm",
            "date_created": "2021-03-02T10:00:00Z",
            "date_updated": null,
            "url": format!("https://conversations.twilio.com{}", credential_path())
        })
        .to_string()
    }

    fn reconciler(server: &ServerGuard) -> ResourceReconciler {
        ResourceReconciler::new(Arc::new(PushCredentialFcmResource::new(
            create_test_client(&server.url()),
        )))
    }

    fn credential_config(secret: &str) -> Config {
        dynamic(json!({ "friendly_name": "android", "secret": secret }))
    }

    #[tokio::test]
    async fn test_secret_written_by_user_survives_refresh() {
        let mut server = Server::new_async().await;
        let create = server
            .mock("POST", "/v1/Credentials")
            .match_body(Matcher::Exact(
                "Type=fcm&FriendlyName=android&Secret=server-key".to_string(),
            ))
            .with_status(201)
            .with_body(credential_body())
            .create_async()
            .await;
        server
            .mock("GET", credential_path().as_str())
            .with_status(200)
            .with_body(credential_body())
            .create_async()
            .await;

        let response = reconciler(&server)
            .create(CreateRequest {
                context: Context::new(),
                config: credential_config("server-key"),
            })
            .await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        let state = response.state.unwrap();
        assert_eq!(
            state.get_string(&AttributePath::new("secret")).unwrap(),
            "server-key"
        );
        assert_eq!(state.get_string(&AttributePath::new("type")).unwrap(), "fcm");
        assert!(!state.has(&AttributePath::new("date_updated")));
        create.assert_async().await;
    }

    #[tokio::test]
    async fn test_new_secret_is_sent_in_place() {
        let mut server = Server::new_async().await;
        let update = server
            .mock("POST", credential_path().as_str())
            .match_body(Matcher::Exact("Secret=rotated-key".to_string()))
            .with_status(200)
            .with_body(credential_body())
            .create_async()
            .await;
        server
            .mock("GET", credential_path().as_str())
            .with_status(200)
            .with_body(credential_body())
            .create_async()
            .await;

        let response = reconciler(&server)
            .update(UpdateRequest {
                context: Context::new(),
                config: credential_config("rotated-key"),
                current_state: dynamic(json!({
                    "id": CREDENTIAL_SID,
                    "sid": CREDENTIAL_SID,
                    "friendly_name": "android",
                    "secret": "server-key"
                })),
            })
            .await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        assert_eq!(
            response
                .state
                .unwrap()
                .get_string(&AttributePath::new("secret"))
                .unwrap(),
            "rotated-key"
        );
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_import_by_credential_path() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", credential_path().as_str())
            .with_status(200)
            .with_body(credential_body())
            .create_async()
            .await;

        let response = reconciler(&server)
            .import(ImportRequest {
                context: Context::new(),
                id: format!("/Credentials/{}", CREDENTIAL_SID),
            })
            .await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        let state = response.state.unwrap();
        assert_eq!(state.id().as_deref(), Some(CREDENTIAL_SID));
        assert!(!state.has(&AttributePath::new("secret")));
    }
}
