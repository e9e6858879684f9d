//! Follow-up calls against the claims service

use serde::de::DeserializeOwned;
use tracing::debug;

use core_kernel::ClaimReference;

use crate::config::ClientConfig;
use crate::dto::{HealthResponse, StoredClaim};
use crate::error::ClientError;

/// Read-only client for the claims service
#[derive(Debug, Clone)]
pub struct ClaimsApi {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ClaimsApi {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: config.http_client()?,
            config,
        })
    }

    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    /// `GET /api/health`
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = self.config.url(&["api", "health"])?;
        self.get_json(url).await
    }

    /// `GET /api/claims/{id}`
    pub async fn fetch_claim(&self, claim_id: &ClaimReference) -> Result<StoredClaim, ClientError> {
        let url = self.config.claim_url(&[claim_id.as_str()])?;
        self.get_json(url).await
    }

    /// `GET /api/claims/{id}/pdf`
    pub async fn download_pdf(&self, claim_id: &ClaimReference) -> Result<Vec<u8>, ClientError> {
        let url = self.config.claim_url(&[claim_id.as_str(), "pdf"])?;
        let response = self.get(url).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: reqwest::Url) -> Result<T, ClientError> {
        let response = self.get(url).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get(&self, url: reqwest::Url) -> Result<reqwest::Response, ClientError> {
        debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(url.path().to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
