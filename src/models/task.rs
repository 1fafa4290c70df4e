use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub position: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_post_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_plan_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    // Only present on the single-task endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_images_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_copy: Option<SelectedCopy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_for_completion: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_event_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedCopy {
    pub id: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct TasksResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Default, Serialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_post_date: Option<String>,
}

/// Partial update; `None` fields are left untouched on the server.
#[derive(Debug, Default, Serialize)]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UpdateTaskRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// Request bodies are nested under a `task` key.
#[derive(Debug, Serialize)]
pub struct TaskEnvelope<'a, T> {
    pub task: &'a T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiscardResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub message: String,
}
