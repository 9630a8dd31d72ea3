//! Reads an IP access control list attached to an Elastic SIP trunk

use async_trait::async_trait;
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::{AttributePath, Config, Context, DataSource, Result, State, TfplugError};

use crate::api::Client;
use crate::state::{required, set_dates};
use crate::validation;

pub const TYPE_NAME: &str = "twilio_sip_trunking_ip_access_control_list";

pub struct TrunkIpAccessControlListDataSource {
    client: Client,
}

impl TrunkIpAccessControlListDataSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

pub fn schema() -> Schema {
    let mut builder = SchemaBuilder::new()
        .version(0)
        .description("Reads an IP access control list attached to a SIP trunk")
        .attribute(
            AttributeBuilder::new("sid", AttributeType::String)
                .required()
                .validator(validation::IP_ACCESS_CONTROL_LIST_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("trunk_sid", AttributeType::String)
                .required()
                .validator(validation::SIP_TRUNK_SID)
                .build(),
        );

    for name in ["account_sid", "friendly_name", "date_created", "date_updated", "url"] {
        builder = builder.attribute(
            AttributeBuilder::new(name, AttributeType::String)
                .computed()
                .build(),
        );
    }

    builder.build()
}

#[async_trait]
impl DataSource for TrunkIpAccessControlListDataSource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn display_name(&self) -> &str {
        "SIP trunk IP access control list"
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn read(&self, _ctx: &Context, config: &Config) -> Result<State> {
        let trunk_sid = required(config, "trunk_sid")?;
        let sid = required(config, "sid")?;
        let list = self
            .client
            .get_trunk_ip_access_control_list(&trunk_sid, &sid)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    TfplugError::NotFound(format!(
                        "SIP trunk IP access control list with sid ({}) was not found for SIP trunk with sid ({})",
                        sid, trunk_sid
                    ))
                } else {
                    e.into()
                }
            })?;

        let mut state = State::empty_object();
        state.set_id(list.sid.clone());
        state.set_string(&AttributePath::new("sid"), list.sid)?;
        state.set_string(&AttributePath::new("account_sid"), list.account_sid)?;
        state.set_string(&AttributePath::new("trunk_sid"), list.trunk_sid)?;
        state.set_optional(&AttributePath::new("friendly_name"), list.friendly_name)?;
        state.set_string(&AttributePath::new("url"), list.url)?;
        set_dates(&mut state, &list.date_created, list.date_updated.as_ref())?;
        Ok(state)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::api::test_helpers::{create_test_client, dynamic, TEST_ACCOUNT_SID};
    use mockito::{Server, ServerGuard};
    use serde_json::json;
    use std::sync::Arc;
    use tfplug::request::ReadDataSourceRequest;
    use tfplug::DataSourceReader;

    const TRUNK_SID: &str = "TKaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const LIST_SID: &str = "ALaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    fn list_path() -> String {
        format!("/v1/Trunks/{}/IpAccessControlLists/{}", TRUNK_SID, LIST_SID)
    }

    fn reader(server: &ServerGuard) -> DataSourceReader {
        DataSourceReader::new(Arc::new(TrunkIpAccessControlListDataSource::new(
            create_test_client(&server.url()),
        )))
    }

    fn request() -> ReadDataSourceRequest {
        ReadDataSourceRequest {
            context: Context::new(),
            config: dynamic(json!({ "sid": LIST_SID, "trunk_sid": TRUNK_SID })),
        }
    }

    #[tokio::test]
    async fn test_read_attached_list() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", list_path().as_str())
            .with_status(200)
            .with_body(
                json!({
                    "sid": LIST_SID,
                    "account_sid": TEST_ACCOUNT_SID,
                    "trunk_sid": TRUNK_SID,
                    "friendly_name": "office",
                    "date_created": "2021-03-02T10:00:00Z",
                    "date_updated": "2021-03-02T10:00:00Z",
                    "url": format!("https://trunking.twilio.com{}", list_path())
                })
                .to_string(),
            )
            .create_async()
            .await;

        let response = reader(&server).read(request()).await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        let state = response.state.unwrap();
        assert_eq!(state.id().as_deref(), Some(LIST_SID));
        assert_eq!(
            state
                .get_string(&AttributePath::new("friendly_name"))
                .unwrap(),
            "office"
        );
    }

    #[tokio::test]
    async fn test_unattached_list_names_both_sids() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", list_path().as_str())
            .with_status(404)
            .with_body(r#"{"code": 20404, "message": "Not found", "status": 404}"#)
            .create_async()
            .await;

        let response = reader(&server).read(request()).await;

        assert!(response.state.is_none());
        assert_eq!(
            response.diagnostics[0].summary,
            "Failed to read SIP trunk IP access control list"
        );
        assert!(response.diagnostics[0].detail.contains(&format!(
            "with sid ({}) was not found for SIP trunk with sid ({})",
            LIST_SID, TRUNK_SID
        )));
    }
}
