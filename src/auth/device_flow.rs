use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::api::client::http_client;
use crate::auth::poller::{TokenEndpoint, TokenPoll};
use crate::models::device::{DeviceAuthorization, TokenErrorResponse, TokenGrant};

#[derive(Debug, Error)]
pub enum DeviceFlowError {
    #[error("failed to create HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("failed to request device code")]
    Transport(#[source] reqwest::Error),

    #[error("failed to request device code (HTTP {status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse device code response")]
    Decode(#[source] serde_json::Error),
}

/// Client for the OAuth device authorization endpoints.
pub struct DeviceFlow {
    base_url: String,
    http: Client,
}

impl DeviceFlow {
    pub fn new(base_url: &str) -> Result<Self, DeviceFlowError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: http_client().map_err(DeviceFlowError::Client)?,
        })
    }

    /// Start a login. Any failure here is fatal; there is no retry.
    pub async fn request_device_code(&self) -> Result<DeviceAuthorization, DeviceFlowError> {
        let url = format!("{}/oauth/device/codes", self.base_url);
        tracing::debug!(%url, "requesting device code");

        let resp = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(DeviceFlowError::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(DeviceFlowError::Transport)?;

        if !status.is_success() {
            return Err(DeviceFlowError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(DeviceFlowError::Decode)
    }
}

#[async_trait]
impl TokenEndpoint for DeviceFlow {
    async fn exchange(&self, device_code: &str, token_name: Option<&str>) -> TokenPoll {
        let url = format!("{}/oauth/device/token", self.base_url);

        let mut form = vec![("device_code", device_code)];
        if let Some(name) = token_name.filter(|n| !n.is_empty()) {
            form.push(("token_name", name));
        }

        let resp = match self.http.post(&url).form(&form).send().await {
            Ok(resp) => resp,
            Err(e) => return TokenPoll::Failed(format!("failed to check token: {e}")),
        };

        let status = resp.status();
        match resp.text().await {
            Ok(body) => classify_token_response(status, &body),
            Err(e) => TokenPoll::Failed(format!("failed to read token response: {e}")),
        }
    }
}

/// Map a token endpoint response onto the polling state machine.
///
/// `authorization_pending` is the only non-terminal answer.
pub fn classify_token_response(status: StatusCode, body: &str) -> TokenPoll {
    match status {
        StatusCode::OK => match serde_json::from_str::<TokenGrant>(body) {
            Ok(grant) => TokenPoll::Granted(grant),
            Err(e) => TokenPoll::Failed(format!("failed to parse token response: {e}")),
        },
        StatusCode::BAD_REQUEST => match serde_json::from_str::<TokenErrorResponse>(body) {
            Ok(err) => match err.error.as_str() {
                "authorization_pending" => TokenPoll::Pending,
                "access_denied" => TokenPoll::Denied,
                "expired_token" => TokenPoll::Expired,
                other => TokenPoll::Failed(match err.error_description {
                    Some(description) => format!("authorization error: {other} ({description})"),
                    None => format!("authorization error: {other}"),
                }),
            },
            Err(_) => TokenPoll::Failed(format!("authorization failed: {body}")),
        },
        _ => TokenPoll::Failed(format!("token request failed (HTTP {status}): {body}")),
    }
}

/// `verification_uri` with the user code pre-filled as `?code=`.
pub fn verification_url(verification_uri: &str, user_code: &str) -> String {
    match url::Url::parse(verification_uri) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("code", user_code);
            url.into()
        }
        Err(_) => format!("{verification_uri}?code={user_code}"),
    }
}

/// `"<hostname> <YYYY-MM-DD>"`, shown on the server's token list.
pub fn default_token_name() -> String {
    let host = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .ok()
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "CLI".to_string());

    format!("{} {}", host, chrono::Local::now().format("%Y-%m-%d"))
}

/// Open `url` in the platform browser.
pub fn open_browser(url: &str) -> std::io::Result<()> {
    open::that(url)
}
