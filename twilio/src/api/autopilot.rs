//! Autopilot task fields and model builds (v1 API)

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::common::{
    deserialize_optional_int, deserialize_optional_timestamp, deserialize_timestamp, segment, Form,
};
use super::{ApiError, Client, Product};

#[derive(Debug, Clone, Deserialize)]
pub struct TaskField {
    pub sid: String,
    pub account_sid: String,
    pub assistant_sid: String,
    pub task_sid: String,
    pub unique_name: String,
    pub field_type: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_created: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date_updated: Option<DateTime<Utc>>,
    pub url: String,
}

fn fields_path(assistant_sid: &str, task_sid: &str) -> String {
    format!(
        "/v1/Assistants/{}/Tasks/{}/Fields",
        segment(assistant_sid),
        segment(task_sid)
    )
}

fn field_path(assistant_sid: &str, task_sid: &str, sid: &str) -> String {
    format!("{}/{}", fields_path(assistant_sid, task_sid), segment(sid))
}

impl Client {
    /// Fields cannot be changed once created
    pub async fn create_task_field(
        &self,
        assistant_sid: &str,
        task_sid: &str,
        unique_name: &str,
        field_type: &str,
    ) -> Result<TaskField, ApiError> {
        let form = Form::new()
            .field("UniqueName", unique_name)
            .field("FieldType", field_type);
        self.post(Product::Autopilot, &fields_path(assistant_sid, task_sid), &form)
            .await
    }

    pub async fn get_task_field(
        &self,
        assistant_sid: &str,
        task_sid: &str,
        sid: &str,
    ) -> Result<TaskField, ApiError> {
        self.get(Product::Autopilot, &field_path(assistant_sid, task_sid, sid))
            .await
    }

    pub async fn delete_task_field(
        &self,
        assistant_sid: &str,
        task_sid: &str,
        sid: &str,
    ) -> Result<(), ApiError> {
        self.delete(Product::Autopilot, &field_path(assistant_sid, task_sid, sid))
            .await
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelBuild {
    pub sid: String,
    pub account_sid: String,
    pub assistant_sid: String,
    pub unique_name: String,
    pub status: String,
    /// Seconds; unset while the build is still running
    #[serde(default, deserialize_with = "deserialize_optional_int")]
    pub build_duration: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_int")]
    pub error_code: Option<i64>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_created: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date_updated: Option<DateTime<Utc>>,
    pub url: String,
}

impl Client {
    /// Looks a build up by SID or unique name
    pub async fn get_model_build(
        &self,
        assistant_sid: &str,
        identifier: &str,
    ) -> Result<ModelBuild, ApiError> {
        let path = format!(
            "/v1/Assistants/{}/ModelBuilds/{}",
            segment(assistant_sid),
            segment(identifier)
        );
        self.get(Product::Autopilot, &path).await
    }
}
