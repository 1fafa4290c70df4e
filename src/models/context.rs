use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Aggregated document handed to AI tooling by `ygm context`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContextResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub organization: ContextOrganization,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<ContextBrand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_plan: Option<ContextMarketingPlan>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tasks: ContextTasks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ContextOrganization {
    pub id: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub slug: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContextBrand {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub company_name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub source_url: String,
    #[serde(default)]
    pub palette: Value,
    #[serde(default)]
    pub fonts: Value,
    #[serde(default)]
    pub voice: Value,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub version: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContextMarketingPlan {
    pub id: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub generation_status: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub task_count: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub pending_tasks: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ContextTasks {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub total: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub by_status: BTreeMap<String, i64>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub pending: Vec<TaskSummary>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub in_progress: Vec<TaskSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_post_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_prompt: Option<String>,
}
