//! Reads an environment of a Serverless service

use async_trait::async_trait;
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::{AttributePath, Config, Context, DataSource, Result, State, TfplugError};

use crate::api::serverless::Environment;
use crate::api::Client;
use crate::state::{required, set_dates};
use crate::validation;

pub const TYPE_NAME: &str = "twilio_serverless_environment";

pub struct EnvironmentDataSource {
    client: Client,
}

impl EnvironmentDataSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

pub fn schema() -> Schema {
    let mut builder = SchemaBuilder::new()
        .version(0)
        .description("Reads a Serverless environment")
        .attribute(
            AttributeBuilder::new("sid", AttributeType::String)
                .required()
                .validator(validation::SERVERLESS_ENVIRONMENT_SID)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("service_sid", AttributeType::String)
                .required()
                .validator(validation::SERVERLESS_SERVICE_SID)
                .build(),
        );

    for name in [
        "account_sid",
        "build_sid",
        "unique_name",
        "domain_suffix",
        "domain_name",
        "date_created",
        "date_updated",
        "url",
    ] {
        builder = builder.attribute(
            AttributeBuilder::new(name, AttributeType::String)
                .computed()
                .build(),
        );
    }

    builder.build()
}

fn environment_state(environment: Environment) -> Result<State> {
    let mut state = State::empty_object();
    state.set_id(environment.sid.clone());
    state.set_string(&AttributePath::new("sid"), environment.sid)?;
    state.set_string(&AttributePath::new("account_sid"), environment.account_sid)?;
    state.set_string(&AttributePath::new("service_sid"), environment.service_sid)?;
    state.set_optional(&AttributePath::new("build_sid"), environment.build_sid)?;
    state.set_string(&AttributePath::new("unique_name"), environment.unique_name)?;
    state.set_optional(&AttributePath::new("domain_suffix"), environment.domain_suffix)?;
    state.set_string(&AttributePath::new("domain_name"), environment.domain_name)?;
    state.set_string(&AttributePath::new("url"), environment.url)?;
    set_dates(
        &mut state,
        &environment.date_created,
        environment.date_updated.as_ref(),
    )?;
    Ok(state)
}

#[async_trait]
impl DataSource for EnvironmentDataSource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn display_name(&self) -> &str {
        "serverless environment"
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn read(&self, _ctx: &Context, config: &Config) -> Result<State> {
        let service_sid = required(config, "service_sid")?;
        let sid = required(config, "sid")?;

        let environment = self
            .client
            .get_serverless_environment(&service_sid, &sid)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    TfplugError::NotFound(format!(
                        "Environment with sid ({}) was not found for serverless service with sid ({})",
                        sid, service_sid
                    ))
                } else {
                    e.into()
                }
            })?;

        environment_state(environment)
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

    const SERVICE_SID: &str = "ZSaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const ENVIRONMENT_SID: &str = "ZEaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    fn environment_path() -> String {
        format!("/v1/Services/{}/Environments/{}", SERVICE_SID, ENVIRONMENT_SID)
    }

    fn reader(server: &ServerGuard) -> DataSourceReader {
        DataSourceReader::new(Arc::new(EnvironmentDataSource::new(create_test_client(
            &server.url(),
        ))))
    }

    fn request() -> ReadDataSourceRequest {
        ReadDataSourceRequest {
            context: Context::new(),
            config: dynamic(json!({ "sid": ENVIRONMENT_SID, "service_sid": SERVICE_SID })),
        }
    }

    #[tokio::test]
    async fn test_environment_without_build() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", environment_path().as_str())
            .with_status(200)
            .with_body(
                json!({
                    "sid": ENVIRONMENT_SID,
                    "account_sid": TEST_ACCOUNT_SID,
                    "service_sid": SERVICE_SID,
                    "build_sid": null,
                    "unique_name": "staging",
                    "domain_suffix": "stage",
                    "domain_name": "hello-1234-stage.twil.io",
                    "date_created": "2021-03-02T10:00:00Z",
                    "date_updated": null,
                    "url": format!("https://serverless.twilio.com{}", environment_path())
                })
                .to_string(),
            )
            .create_async()
            .await;

        let response = reader(&server).read(request()).await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        let state = response.state.unwrap();
        assert_eq!(state.id().as_deref(), Some(ENVIRONMENT_SID));
        assert_eq!(
            state.get_string(&AttributePath::new("domain_name")).unwrap(),
            "hello-1234-stage.twil.io"
        );
        assert!(!state.has(&AttributePath::new("build_sid")));
        assert!(!state.has(&AttributePath::new("date_updated")));
    }

    #[tokio::test]
    async fn test_unknown_environment_names_the_service() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", environment_path().as_str())
            .with_status(404)
            .with_body(r#"{"code": 20404, "message": "Not found", "status": 404}"#)
            .create_async()
            .await;

        let response = reader(&server).read(request()).await;

        assert!(response.state.is_none());
        assert!(response.diagnostics[0].detail.contains(&format!(
            "Environment with sid ({}) was not found for serverless service with sid ({})",
            ENVIRONMENT_SID, SERVICE_SID
        )));
    }
}
