//! Looks up a Flex plugin and its latest version

use async_trait::async_trait;
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::{AttributePath, Config, Context, DataSource, Result, State, TfplugError};

use crate::api::flex::{Plugin, PluginVersion};
use crate::api::Client;
use crate::state::{optional, set_dates};
use crate::validation;

pub const TYPE_NAME: &str = "twilio_flex_plugin";

pub struct FlexPluginDataSource {
    client: Client,
}

impl FlexPluginDataSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

pub fn schema() -> Schema {
    let mut builder = SchemaBuilder::new()
        .version(0)
        .description("Looks up a Flex plugin by SID or unique name")
        .attribute(
            AttributeBuilder::new("sid", AttributeType::String)
                .optional()
                .computed()
                .validator(validation::FLEX_PLUGIN_SID)
                .exactly_one_of(&["sid", "unique_name"])
                .build(),
        )
        .attribute(
            AttributeBuilder::new("unique_name", AttributeType::String)
                .optional()
                .computed()
                .exactly_one_of(&["sid", "unique_name"])
                .build(),
        );

    for (name, attribute_type) in [
        ("account_sid", AttributeType::String),
        ("friendly_name", AttributeType::String),
        ("description", AttributeType::String),
        ("archived", AttributeType::Bool),
        ("latest_version_sid", AttributeType::String),
        ("version", AttributeType::String),
        ("changelog", AttributeType::String),
        ("plugin_url", AttributeType::String),
        ("private", AttributeType::Bool),
        ("version_archived", AttributeType::Bool),
        ("date_created", AttributeType::String),
        ("date_updated", AttributeType::String),
        ("url", AttributeType::String),
    ] {
        builder = builder.attribute(AttributeBuilder::new(name, attribute_type).computed().build());
    }

    builder.build()
}

fn plugin_state(plugin: &Plugin, latest: Option<&PluginVersion>) -> Result<State> {
    let mut state = State::empty_object();
    state.set_id(plugin.sid.clone());
    state.set_string(&AttributePath::new("sid"), plugin.sid.clone())?;
    state.set_string(&AttributePath::new("account_sid"), plugin.account_sid.clone())?;
    state.set_string(&AttributePath::new("unique_name"), plugin.unique_name.clone())?;
    state.set_optional(&AttributePath::new("friendly_name"), plugin.friendly_name.clone())?;
    state.set_optional(&AttributePath::new("description"), plugin.description.clone())?;
    state.set_bool(&AttributePath::new("archived"), plugin.archived)?;
    state.set_string(&AttributePath::new("url"), plugin.url.clone())?;
    set_dates(&mut state, &plugin.date_created, plugin.date_updated.as_ref())?;

    if let Some(version) = latest {
        state.set_string(&AttributePath::new("latest_version_sid"), version.sid.clone())?;
        state.set_string(&AttributePath::new("version"), version.version.clone())?;
        state.set_optional(&AttributePath::new("changelog"), version.changelog.clone())?;
        state.set_optional(&AttributePath::new("plugin_url"), version.plugin_url.clone())?;
        state.set_bool(&AttributePath::new("private"), version.private)?;
        state.set_bool(&AttributePath::new("version_archived"), version.archived)?;
    }
    Ok(state)
}

#[async_trait]
impl DataSource for FlexPluginDataSource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn display_name(&self) -> &str {
        "Flex plugin"
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn read(&self, _ctx: &Context, config: &Config) -> Result<State> {
        let identifier = optional(config, "sid")
            .or_else(|| optional(config, "unique_name"))
            .ok_or_else(|| TfplugError::MissingAttribute("sid".to_string()))?;

        let plugin = self
            .client
            .get_flex_plugin(&identifier)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    TfplugError::NotFound(format!(
                        "Flex plugin with sid/ unique name ({}) was not found",
                        identifier
                    ))
                } else {
                    e.into()
                }
            })?;

        let latest = self.client.latest_flex_plugin_version(&plugin.sid).await?;
        if latest.is_none() {
            tracing::info!("No flex plugin versions found for plugin ({})", plugin.sid);
        }

        plugin_state(&plugin, latest.as_ref())
    }
}
