//! TaskRouter workflows (v1 API)

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tfplug::Page;

use super::common::{
    deserialize_optional_int, deserialize_optional_timestamp, deserialize_timestamp, segment,
    ListResponse, PageMeta,
};
use super::{ApiError, Client, Product};

#[derive(Debug, Clone, Deserialize)]
pub struct Workflow {
    pub sid: String,
    pub account_sid: String,
    pub workspace_sid: String,
    pub friendly_name: String,
    pub fallback_assignment_callback_url: Option<String>,
    pub assignment_callback_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_int")]
    pub task_reservation_timeout: Option<i64>,
    pub document_content_type: Option<String>,
    pub configuration: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_created: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date_updated: Option<DateTime<Utc>>,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct WorkflowsPage {
    workflows: Vec<Workflow>,
    #[serde(default)]
    meta: PageMeta,
}

impl ListResponse for WorkflowsPage {
    type Item = Workflow;

    fn into_page(self) -> Page<Workflow> {
        Page {
            items: self.workflows,
            next: self.meta.next_page_url,
        }
    }
}

impl Client {
    /// Every workflow in the workspace, optionally filtered by friendly name
    pub async fn list_workflows(
        &self,
        workspace_sid: &str,
        friendly_name: Option<&str>,
    ) -> Result<Vec<Workflow>, ApiError> {
        let path = format!("/v1/Workspaces/{}/Workflows", segment(workspace_sid));
        let mut query = vec![("PageSize", "50".to_string())];
        if let Some(name) = friendly_name {
            query.push(("FriendlyName", name.to_string()));
        }
        self.list_all::<WorkflowsPage>(Product::TaskRouter, &path, &query)
            .await
    }
}
