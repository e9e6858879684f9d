//! Multipart HTTP transport for claim submission

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use tracing::{debug, warn};

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_claims::{ClaimPayload, ClaimTransport, PayloadEntry, TransportResponse};

use crate::config::ClientConfig;
use crate::error::{port_error, ClientError};

/// Sends claim payloads as one `multipart/form-data` POST
///
/// The boundary and content type are left to reqwest.
#[derive(Debug, Clone)]
pub struct HttpClaimTransport {
    client: reqwest::Client,
    claims_url: Url,
    health_url: Url,
    timeout: Option<Duration>,
}

impl HttpClaimTransport {
    /// Creates a transport with its own HTTP client
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::with_client(config.http_client()?, config)
    }

    /// Creates a transport sharing an existing HTTP client
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client,
            claims_url: config.claims_url()?,
            health_url: config.url(&["api", "health"])?,
            timeout: config.timeout(),
        })
    }

    pub fn claims_url(&self) -> &Url {
        &self.claims_url
    }

    /// Turns the payload into a multipart form, preserving entry order
    pub fn build_form(payload: ClaimPayload) -> Result<Form, PortError> {
        let mut form = Form::new();
        for entry in payload.into_entries() {
            form = match entry {
                PayloadEntry::Text { key, value } => form.text(key, value),
                PayloadEntry::File { key, attachment } => {
                    let content_type = attachment.content_type;
                    let part = Part::bytes(attachment.bytes)
                        .file_name(attachment.file_name)
                        .mime_str(&content_type)
                        .map_err(|e| {
                            PortError::transformation(
                                key,
                                format!("invalid content type '{content_type}': {e}"),
                            )
                        })?;
                    form.part(key, part)
                }
            };
        }
        Ok(form)
    }
}

impl DomainPort for HttpClaimTransport {}

#[async_trait]
impl ClaimTransport for HttpClaimTransport {
    async fn submit(&self, payload: ClaimPayload) -> Result<TransportResponse, PortError> {
        let files = payload.file_entries().count();
        let form = Self::build_form(payload)?;

        debug!(url = %self.claims_url, files, "Posting claim");

        let response = self
            .client
            .post(self.claims_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| port_error("submit_claim", self.timeout, e))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            warn!(status, "Claims endpoint rejected submission");
            return Ok(TransportResponse::new(status, Vec::new()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| port_error("read_claim_response", self.timeout, e))?;

        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

#[async_trait]
impl HealthCheckable for HttpClaimTransport {
    async fn health_check(&self) -> HealthCheckResult {
        let started = Instant::now();
        let result = self.client.get(self.health_url.clone()).send().await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(response) if response.status().is_success() => (AdapterHealth::Healthy, None),
            Ok(response) => (
                AdapterHealth::Degraded,
                Some(format!("health endpoint returned {}", response.status())),
            ),
            Err(e) => (AdapterHealth::Unhealthy, Some(e.to_string())),
        };

        HealthCheckResult {
            adapter_id: "http-claim-transport".to_string(),
            status,
            latency_ms,
            message,
            checked_at: chrono::Utc::now(),
        }
    }
}
