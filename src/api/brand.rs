use reqwest::{Method, StatusCode};

use crate::api::client::expect;
use crate::api::{ApiError, YgmClient};
use crate::models::brand::{BrandDna, BrandVersionsResponse};

impl YgmClient {
    /// Fetch the active brand DNA. `None` when the organization has not set one up.
    pub async fn get_brand(&self) -> Result<Option<BrandDna>, ApiError> {
        let resp = self.send(self.request(Method::GET, "/api/v1/brand")).await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        expect(resp, StatusCode::OK).await.map(Some)
    }

    /// Every brand DNA version, newest first as returned by the server.
    pub async fn list_brand_versions(&self) -> Result<Vec<BrandDna>, ApiError> {
        let resp = self
            .send(self.request(Method::GET, "/api/v1/brand/versions"))
            .await?;

        let list: BrandVersionsResponse = expect(resp, StatusCode::OK).await?;
        Ok(list.versions)
    }
}
