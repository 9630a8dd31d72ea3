//! Reads an IP access control list mapped onto a SIP domain's call authentication

use async_trait::async_trait;
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::{AttributePath, Config, Context, DataSource, Result, State, TfplugError};

use crate::api::Client;
use crate::state::{required, set_dates};
use crate::validation;

pub const TYPE_NAME: &str = "twilio_sip_domain_ip_access_control_list_mapping";

pub struct DomainIpAccessControlListMappingDataSource {
    client: Client,
}

impl DomainIpAccessControlListMappingDataSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

pub fn schema() -> Schema {
    SchemaBuilder::new()
        .version(0)
        .description("Reads an IP access control list mapping of a SIP domain")
        .attribute(
            AttributeBuilder::new("sid", AttributeType::String)
                .required()
                .validator(validation::IP_ACCESS_CONTROL_LIST_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("account_sid", AttributeType::String)
                .required()
                .validator(validation::ACCOUNT_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("domain_sid", AttributeType::String)
                .required()
                .validator(validation::SIP_DOMAIN_SID)
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
        .build()
}

#[async_trait]
impl DataSource for DomainIpAccessControlListMappingDataSource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn display_name(&self) -> &str {
        "SIP domain IP access control list mapping"
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn read(&self, _ctx: &Context, config: &Config) -> Result<State> {
        let account_sid = required(config, "account_sid")?;
        let domain_sid = required(config, "domain_sid")?;
        let sid = required(config, "sid")?;

        let mapping = self
            .client
            .get_sip_domain_ip_access_control_list_mapping(&account_sid, &domain_sid, &sid)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    TfplugError::NotFound(format!(
                        "SIP domain IP access control list mapping with sid ({}) was not found for account with sid ({}) and domain with sid ({})",
                        sid, account_sid, domain_sid
                    ))
                } else {
                    e.into()
                }
            })?;

        let mut state = State::empty_object();
        state.set_id(mapping.sid.clone());
        state.set_string(&AttributePath::new("sid"), mapping.sid)?;
        state.set_string(&AttributePath::new("account_sid"), mapping.account_sid)?;
        state.set_string(&AttributePath::new("domain_sid"), domain_sid)?;
        state.set_optional(&AttributePath::new("friendly_name"), mapping.friendly_name)?;
        set_dates(&mut state, &mapping.date_created, mapping.date_updated.as_ref())?;
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

    const DOMAIN_SID: &str = "SDaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const LIST_SID: &str = "ALaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    fn mapping_path() -> String {
        format!(
            "/2010-04-01/Accounts/{}/SIP/Domains/{}/Auth/Calls/IpAccessControlListMappings/{}.json",
            TEST_ACCOUNT_SID, DOMAIN_SID, LIST_SID
        )
    }

    fn reader(server: &ServerGuard) -> DataSourceReader {
        DataSourceReader::new(Arc::new(DomainIpAccessControlListMappingDataSource::new(
            create_test_client(&server.url()),
        )))
    }

    fn request(domain_sid: &str) -> ReadDataSourceRequest {
        ReadDataSourceRequest {
            context: Context::new(),
            config: dynamic(json!({
                "sid": LIST_SID,
                "account_sid": TEST_ACCOUNT_SID,
                "domain_sid": domain_sid
            })),
        }
    }

    #[tokio::test]
    async fn test_read_mapping_in_rfc2822_dates() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", mapping_path().as_str())
            .with_status(200)
            .with_body(
                json!({
                    "sid": LIST_SID,
                    "account_sid": TEST_ACCOUNT_SID,
                    "friendly_name": "office",
                    "date_created": "Tue, 02 Mar 2021 10:00:00 +0000",
                    "date_updated": "Tue, 02 Mar 2021 11:00:00 +0000"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let response = reader(&server).read(request(DOMAIN_SID)).await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        let state = response.state.unwrap();
        assert_eq!(state.id().as_deref(), Some(LIST_SID));
        assert_eq!(
            state.get_string(&AttributePath::new("domain_sid")).unwrap(),
            DOMAIN_SID
        );
        assert_eq!(
            state.get_string(&AttributePath::new("date_created")).unwrap(),
            "2021-03-02T10:00:00Z"
        );
    }

    #[tokio::test]
    async fn test_missing_mapping_names_account_and_domain() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", mapping_path().as_str())
            .with_status(404)
            .with_body(r#"{"code": 20404, "message": "Not found", "status": 404}"#)
            .create_async()
            .await;

        let response = reader(&server).read(request(DOMAIN_SID)).await;

        assert!(response.state.is_none());
        assert!(response.diagnostics[0].detail.contains(&format!(
            "was not found for account with sid ({}) and domain with sid ({})",
            TEST_ACCOUNT_SID, DOMAIN_SID
        )));
    }

    #[tokio::test]
    async fn test_domain_sid_prefix_is_validated() {
        let server = Server::new_async().await;

        let response = reader(&server)
            .read(request("ALaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"))
            .await;

        assert!(response.state.is_none());
        assert!(!response.diagnostics.is_empty());
    }
}
