//! AWS credential resource
//!
//! Twilio never returns the key pair. The secret access key is sensitive and
//! carried forward by the reconciler; the access key id is copied from the
//! prior state on every read.

use async_trait::async_trait;
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::validator::StringNotEmptyValidator;
use tfplug::{AttributePath, Changes, Config, Context, Resource, Result, State};

use crate::api::accounts::{AwsCredential, AwsCredentialInput};
use crate::api::Client;
use crate::state::{optional, required, set_dates};
use crate::validation;

pub const TYPE_NAME: &str = "twilio_credentials_aws";

pub struct AwsCredentialResource {
    client: Client,
}

impl AwsCredentialResource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

pub fn schema() -> Schema {
    SchemaBuilder::new()
        .version(0)
        .description("Stores an AWS key pair for use by other Twilio products")
        .attribute(
            AttributeBuilder::new("sid", AttributeType::String)
                .computed()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("account_sid", AttributeType::String)
                .description("The subaccount to store the credential on")
                .optional()
                .computed()
                .force_new()
                .validator(validation::ACCOUNT_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("friendly_name", AttributeType::String)
                .optional()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("aws_access_key_id", AttributeType::String)
                .required()
                .force_new()
                .validator(StringNotEmptyValidator)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("aws_secret_access_key", AttributeType::String)
                .required()
                .force_new()
                .sensitive()
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

fn credential_state(prior: &State, credential: &AwsCredential) -> Result<State> {
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
    state.set_optional(
        &AttributePath::new("aws_access_key_id"),
        optional(prior, "aws_access_key_id"),
    )?;
    state.set_string(&AttributePath::new("url"), credential.url.clone())?;
    set_dates(&mut state, &credential.date_created, credential.date_updated.as_ref())?;
    Ok(state)
}

#[async_trait]
impl Resource for AwsCredentialResource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn display_name(&self) -> &str {
        "AWS credential"
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn create(&self, _ctx: &Context, config: &Config) -> Result<State> {
        let changes = Changes::creating(config);
        let input = AwsCredentialInput {
            access_key_id: changes.require_string("aws_access_key_id")?,
            secret_access_key: changes.require_string("aws_secret_access_key")?,
            friendly_name: changes.string("friendly_name"),
            account_sid: changes.string_no_clear("account_sid"),
        };
        let credential = self.client.create_aws_credential(&input).await?;

        let mut seed = State::empty_object();
        seed.set_id(credential.sid);
        Ok(seed)
    }

    async fn read(&self, _ctx: &Context, state: &State) -> Result<State> {
        let credential = self
            .client
            .get_aws_credential(&required(state, "id")?)
            .await?;
        credential_state(state, &credential)
    }

    async fn update(&self, _ctx: &Context, changes: &Changes<'_>) -> Result<()> {
        self.client
            .update_aws_credential(&changes.id()?, &changes.string("friendly_name"))
            .await?;
        Ok(())
    }

    async fn delete(&self, _ctx: &Context, state: &State) -> Result<()> {
        self.client
            .delete_aws_credential(&required(state, "id")?)
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
    use tfplug::request::{CreateRequest, ReadRequest, UpdateRequest};
    use tfplug::ResourceReconciler;

    const CREDENTIAL_SID: &str = "CRaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    fn credential_path() -> String {
        format!("/v1/Credentials/AWS/{}", CREDENTIAL_SID)
    }

    fn credential_body(friendly_name: &str) -> String {
        json!({
            "sid": CREDENTIAL_SID,
            "account_sid": TEST_ACCOUNT_SID,
            "friendly_name": friendly_name,
            "date_created": "2021-03-02T10:00:00Z",
            "date_updated": "2021-03-02T11:00:00Z",
            "url": format!("https://accounts.twilio.com{}", credential_path())
        })
        .to_string()
    }

    fn reconciler(server: &ServerGuard) -> ResourceReconciler {
        ResourceReconciler::new(Arc::new(AwsCredentialResource::new(create_test_client(
            &server.url(),
        ))))
    }

    fn credential_config(friendly_name: &str, secret: &str) -> Config {
        dynamic(json!({
            "friendly_name": friendly_name,
            "aws_access_key_id": "AKIAEXAMPLE",
            "aws_secret_access_key": secret
        }))
    }

    async fn created_state(server: &mut ServerGuard) -> State {
        server
            .mock("POST", "/v1/Credentials/AWS")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("Credentials".into(), "AKIAEXAMPLE:wJalr/secret".into()),
                Matcher::UrlEncoded("FriendlyName".into(), "recordings".into()),
            ]))
            .with_status(201)
            .with_body(credential_body("recordings"))
            .create_async()
            .await;
        let read = server
            .mock("GET", credential_path().as_str())
            .with_status(200)
            .with_body(credential_body("recordings"))
            .create_async()
            .await;

        let response = reconciler(server)
            .create(CreateRequest {
                context: Context::new(),
                config: credential_config("recordings", "wJalr/secret"),
            })
            .await;
        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        read.remove_async().await;
        response.state.unwrap()
    }

    #[tokio::test]
    async fn test_key_pair_is_kept_after_refresh() {
        let mut server = Server::new_async().await;
        let state = created_state(&mut server).await;

        assert_eq!(
            state
                .get_string(&AttributePath::new("account_sid"))
                .unwrap(),
            TEST_ACCOUNT_SID
        );
        assert_eq!(
            state
                .get_string(&AttributePath::new("aws_secret_access_key"))
                .unwrap(),
            "wJalr/secret"
        );

        server
            .mock("GET", credential_path().as_str())
            .with_status(200)
            .with_body(credential_body("recordings"))
            .create_async()
            .await;
        let refreshed = reconciler(&server)
            .read(ReadRequest {
                context: Context::new(),
                current_state: state,
            })
            .await
            .state
            .unwrap();

        assert_eq!(
            refreshed
                .get_string(&AttributePath::new("aws_access_key_id"))
                .unwrap(),
            "AKIAEXAMPLE"
        );
        assert_eq!(
            refreshed
                .get_string(&AttributePath::new("aws_secret_access_key"))
                .unwrap(),
            "wJalr/secret"
        );
    }

    #[tokio::test]
    async fn test_update_only_renames() {
        let mut server = Server::new_async().await;
        let state = created_state(&mut server).await;

        let update = server
            .mock("POST", credential_path().as_str())
            .match_body(Matcher::Exact("FriendlyName=archive".to_string()))
            .with_status(200)
            .with_body(credential_body("archive"))
            .create_async()
            .await;
        server
            .mock("GET", credential_path().as_str())
            .with_status(200)
            .with_body(credential_body("archive"))
            .create_async()
            .await;

        let response = reconciler(&server)
            .update(UpdateRequest {
                context: Context::new(),
                config: credential_config("archive", "wJalr/secret"),
                current_state: state,
            })
            .await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        let state = response.state.unwrap();
        assert_eq!(
            state
                .get_string(&AttributePath::new("friendly_name"))
                .unwrap(),
            "archive"
        );
        assert_eq!(
            state
                .get_string(&AttributePath::new("aws_secret_access_key"))
                .unwrap(),
            "wJalr/secret"
        );
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_rotating_the_secret_requires_replacement() {
        let mut server = Server::new_async().await;
        let state = created_state(&mut server).await;
        let remote_update = server
            .mock("POST", credential_path().as_str())
            .expect(0)
            .create_async()
            .await;

        let response = reconciler(&server)
            .update(UpdateRequest {
                context: Context::new(),
                config: credential_config("recordings", "rotated"),
                current_state: state,
            })
            .await;

        assert_eq!(response.diagnostics.len(), 1);
        assert!(response.diagnostics[0]
            .detail
            .contains("aws_secret_access_key"));
        remote_update.assert_async().await;
    }
}
