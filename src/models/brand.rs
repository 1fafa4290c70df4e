use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Brand DNA as extracted from the organization's website.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandDna {
    pub id: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub version: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub source_url: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub source_type: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub company_name: String,
    #[serde(default)]
    pub palette: Value,
    #[serde(default)]
    pub fonts: Value,
    #[serde(default)]
    pub voice: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct BrandVersionsResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub versions: Vec<BrandDna>,
}
