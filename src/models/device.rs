use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Response to a device code request. Lives only for the duration of one login.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceAuthorization {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    pub expires_in: u64,
    pub interval: u64,
    /// When the response was received; the login deadline counts from here.
    #[serde(skip, default = "Instant::now")]
    pub issued_at: Instant,
}

/// Successful token exchange payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub token_type: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub scope: String,
    pub organization: OrganizationInfo,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationInfo {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: String,
}

/// OAuth-style error object returned by the token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}
