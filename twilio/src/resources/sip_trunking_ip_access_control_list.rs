//! Attaches an IP access control list to an Elastic SIP trunk

use async_trait::async_trait;
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::{AttributePath, Config, Context, ImportTemplate, Resource, Result, State};

use crate::api::trunking::TrunkIpAccessControlList;
use crate::api::Client;
use crate::state::{required, set_dates};
use crate::validation;

pub const TYPE_NAME: &str = "twilio_sip_trunking_ip_access_control_list";

const IMPORT_TEMPLATE: ImportTemplate =
    ImportTemplate::new("/Trunks/{trunk_sid}/IpAccessControlLists/{sid}");

pub struct TrunkIpAccessControlListResource {
    client: Client,
}

impl TrunkIpAccessControlListResource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

pub fn schema() -> Schema {
    SchemaBuilder::new()
        .version(0)
        .description("Associates an IP access control list with a SIP trunk")
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
            AttributeBuilder::new("trunk_sid", AttributeType::String)
                .description("The trunk to attach the list to")
                .required()
                .force_new()
                .validator(validation::SIP_TRUNK_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("ip_access_control_list_sid", AttributeType::String)
                .description("The IP access control list to attach")
                .required()
                .force_new()
                .validator(validation::IP_ACCESS_CONTROL_LIST_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("friendly_name", AttributeType::String)
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

/// The association shares its SID with the attached list
fn association_state(list: &TrunkIpAccessControlList) -> Result<State> {
    let mut state = State::empty_object();
    state.set_id(list.sid.clone());
    state.set_string(&AttributePath::new("sid"), list.sid.clone())?;
    state.set_string(&AttributePath::new("account_sid"), list.account_sid.clone())?;
    state.set_string(&AttributePath::new("trunk_sid"), list.trunk_sid.clone())?;
    state.set_string(
        &AttributePath::new("ip_access_control_list_sid"),
        list.sid.clone(),
    )?;
    state.set_optional(&AttributePath::new("friendly_name"), list.friendly_name.clone())?;
    state.set_string(&AttributePath::new("url"), list.url.clone())?;
    set_dates(&mut state, &list.date_created, list.date_updated.as_ref())?;
    Ok(state)
}

#[async_trait]
impl Resource for TrunkIpAccessControlListResource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn display_name(&self) -> &str {
        "SIP trunk IP access control list"
    }

    fn schema(&self) -> Schema {
        schema()
    }

    fn import_template(&self) -> Option<ImportTemplate> {
        Some(IMPORT_TEMPLATE)
    }

    async fn create(&self, _ctx: &Context, config: &Config) -> Result<State> {
        let list = self
            .client
            .add_trunk_ip_access_control_list(
                &required(config, "trunk_sid")?,
                &required(config, "ip_access_control_list_sid")?,
            )
            .await?;

        let mut seed = State::empty_object();
        seed.set_id(list.sid);
        Ok(seed)
    }

    async fn read(&self, _ctx: &Context, state: &State) -> Result<State> {
        let list = self
            .client
            .get_trunk_ip_access_control_list(
                &required(state, "trunk_sid")?,
                &required(state, "id")?,
            )
            .await?;
        association_state(&list)
    }

    async fn delete(&self, _ctx: &Context, state: &State) -> Result<()> {
        self.client
            .remove_trunk_ip_access_control_list(
                &required(state, "trunk_sid")?,
                &required(state, "id")?,
            )
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
    use tfplug::request::{CreateRequest, DeleteRequest, ImportRequest};
    use tfplug::ResourceReconciler;

    const TRUNK_SID: &str = "TKaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const LIST_SID: &str = "ALaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    fn lists_path() -> String {
        format!("/v1/Trunks/{}/IpAccessControlLists", TRUNK_SID)
    }

    fn list_path() -> String {
        format!("{}/{}", lists_path(), LIST_SID)
    }

    fn list_body() -> String {
        json!({
            "sid": LIST_SID,
            "account_sid": TEST_ACCOUNT_SID,
            "trunk_sid": TRUNK_SID,
            "friendly_name": "office",
            "date_created": "2021-03-02T10:00:00Z",
            "date_updated": "2021-03-02T10:00:00Z",
            "url": format!("https://trunking.twilio.com{}", list_path())
        })
        .to_string()
    }

    fn reconciler(server: &ServerGuard) -> ResourceReconciler {
        ResourceReconciler::new(Arc::new(TrunkIpAccessControlListResource::new(
            create_test_client(&server.url()),
        )))
    }

    #[tokio::test]
    async fn test_create_attaches_list() {
        let mut server = Server::new_async().await;
        let create = server
            .mock("POST", lists_path().as_str())
            .match_body(Matcher::Exact(format!(
                "IpAccessControlListSid={}",
                LIST_SID
            )))
            .with_status(201)
            .with_body(list_body())
            .create_async()
            .await;
        server
            .mock("GET", list_path().as_str())
            .with_status(200)
            .with_body(list_body())
            .create_async()
            .await;

        let response = reconciler(&server)
            .create(CreateRequest {
                context: Context::new(),
                config: dynamic(json!({
                    "trunk_sid": TRUNK_SID,
                    "ip_access_control_list_sid": LIST_SID
                })),
            })
            .await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        let state = response.state.unwrap();
        assert_eq!(state.id().as_deref(), Some(LIST_SID));
        assert_eq!(
            state
                .get_string(&AttributePath::new("friendly_name"))
                .unwrap(),
            "office"
        );
        create.assert_async().await;
    }

    #[tokio::test]
    async fn test_import_sets_list_sid_from_association() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", list_path().as_str())
            .with_status(200)
            .with_body(list_body())
            .create_async()
            .await;

        let response = reconciler(&server)
            .import(ImportRequest {
                context: Context::new(),
                id: format!("/Trunks/{}/IpAccessControlLists/{}", TRUNK_SID, LIST_SID),
            })
            .await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        let state = response.state.unwrap();
        assert_eq!(
            state
                .get_string(&AttributePath::new("ip_access_control_list_sid"))
                .unwrap(),
            LIST_SID
        );
        assert_eq!(
            state.get_string(&AttributePath::new("trunk_sid")).unwrap(),
            TRUNK_SID
        );
    }

    #[tokio::test]
    async fn test_delete_detaches_list() {
        let mut server = Server::new_async().await;
        let delete = server
            .mock("DELETE", list_path().as_str())
            .with_status(204)
            .create_async()
            .await;

        let response = reconciler(&server)
            .delete(DeleteRequest {
                context: Context::new(),
                current_state: dynamic(json!({
                    "id": LIST_SID,
                    "trunk_sid": TRUNK_SID,
                    "ip_access_control_list_sid": LIST_SID
                })),
            })
            .await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        delete.assert_async().await;
    }
}
