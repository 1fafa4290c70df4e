use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::api::ApiError;

const USER_AGENT: &str = concat!("ygm/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: String,
}

/// HTTP client shared by the REST surface and the device flow.
pub fn http_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
}

/// Bearer-authenticated client for one organization's API.
pub struct YgmClient {
    pub base_url: String,
    pub token: String,
    pub http: Client,
}

impl YgmClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            http: http_client()?,
        })
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "api request");

        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
    }

    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let resp = request.send().await?;
        tracing::debug!(status = %resp.status(), url = %resp.url(), "api response");
        Ok(resp)
    }
}

/// Decode a JSON body, keeping parse failures distinct from transport failures.
pub(crate) async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let body = resp.bytes().await?;
    serde_json::from_slice(&body).map_err(ApiError::Decode)
}

/// Decode `resp` if it has the `expected` status, otherwise turn it into an error.
pub(crate) async fn expect<T: DeserializeOwned>(
    resp: Response,
    expected: StatusCode,
) -> Result<T, ApiError> {
    if resp.status() != expected {
        return Err(error_from(resp).await);
    }
    decode(resp).await
}

/// Prefer the server's `error` message, fall back to raw status and body.
pub(crate) async fn error_from(resp: Response) -> ApiError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) if !parsed.error.is_empty() => ApiError::Server(parsed.error),
        _ => ApiError::Status { status, body },
    }
}
