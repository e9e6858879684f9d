//! Client configuration

use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

use domain_claims::SubmissionPolicy;

use crate::error::ClientError;

/// Client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the claims service
    pub base_url: String,
    /// Path of the claims collection, relative to `base_url`
    pub claims_path: String,
    /// Request timeout in seconds; `None` keeps the transport default
    pub timeout_secs: Option<u64>,
    /// Log level
    pub log_level: String,
    /// Form controller policy
    pub policy: SubmissionPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            claims_path: "/api/claims".to_string(),
            timeout_secs: None,
            log_level: "info".to_string(),
            policy: SubmissionPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration pointing at the given service
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from environment
    ///
    /// `CLAIMS_BASE_URL`, `CLAIMS_TIMEOUT_SECS`, `CLAIMS_POLICY__RESET_AFTER_SUCCESS`, ...
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("CLAIMS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// URL of the claims collection
    pub fn claims_url(&self) -> Result<Url, ClientError> {
        let path: Vec<&str> = self.claims_path.split('/').filter(|s| !s.is_empty()).collect();
        self.url(&path)
    }

    /// URL of a single claim or one of its sub-resources
    pub fn claim_url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.claims_url()?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Builds a URL under `base_url` from path segments, percent-encoding each
    pub fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Builds the HTTP client shared by transport and API
    pub fn http_client(&self) -> Result<reqwest::Client, ClientError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("farmsure-claim-intake/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}
