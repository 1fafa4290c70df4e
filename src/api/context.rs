use reqwest::{Method, StatusCode};

use crate::api::client::expect;
use crate::api::{ApiError, YgmClient};
use crate::models::context::ContextResponse;

impl YgmClient {
    /// Fetch the aggregated brand, plan and task document meant for AI tooling.
    pub async fn get_context(&self) -> Result<ContextResponse, ApiError> {
        let resp = self.send(self.request(Method::GET, "/api/v1/context")).await?;
        expect(resp, StatusCode::OK).await
    }
}
