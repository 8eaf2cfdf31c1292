//! Merge-confidence enrichment
//!
//! This module provides:
//! - The `MergeConfidenceLookup` trait consumed by the update generator
//! - An HTTP client implementation with timeout, User-Agent and
//!   exponential backoff retry logic (max 3 retries)
//!
//! Enrichment is strictly best-effort: a failed or cancelled lookup
//! leaves the confidence field absent and never invalidates an update.

use crate::domain::{MergeConfidence, UpdateType};
use crate::error::EnrichmentError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("upres/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// One confidence query for a version transition
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceRequest<'a> {
    /// Registry datasource identifier (e.g. "npm")
    pub datasource: &'a str,
    /// Package name
    pub package_name: &'a str,
    /// The version currently in use, when known
    pub current_version: Option<&'a str>,
    /// The proposed version
    pub new_version: &'a str,
    /// The classified update type, when already known
    pub update_type: Option<UpdateType>,
}

/// Capability for looking up empirical confidence scores
#[async_trait]
pub trait MergeConfidenceLookup: Send + Sync {
    /// Returns the confidence level for a transition, or `None` when the
    /// service has no data for it
    async fn lookup(
        &self,
        request: &ConfidenceRequest<'_>,
    ) -> Result<Option<MergeConfidence>, EnrichmentError>;
}

/// Wire shape of the confidence service response
#[derive(Debug, Deserialize)]
struct ConfidenceResponse {
    confidence: Option<String>,
}

/// HTTP client for a merge-confidence service
#[derive(Clone)]
pub struct HttpConfidenceClient {
    client: Client,
    base_url: String,
    max_retries: u32,
}

impl HttpConfidenceClient {
    /// Create a client with default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self, EnrichmentError> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a client with custom timeout and User-Agent
    pub fn with_config(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, EnrichmentError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                EnrichmentError::network("", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: MAX_RETRIES,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn transition_url(&self, request: &ConfidenceRequest<'_>) -> String {
        format!(
            "{}/api/confidence/{}/{}/{}/{}",
            self.base_url,
            request.datasource,
            request.package_name,
            request.current_version.unwrap_or("unknown"),
            request.new_version,
        )
    }

    /// Perform the GET with retry logic; 404 means "no data", not an error
    async fn fetch_level(
        &self,
        url: &str,
        package: &str,
    ) -> Result<Option<MergeConfidence>, EnrichmentError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(EnrichmentError::RateLimitExceeded);
                        if attempt < self.max_retries {
                            tokio::time::sleep(Duration::from_millis(delay)).await;
                            delay *= 2;
                            continue;
                        }
                        break;
                    }

                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Ok(None);
                    }

                    if !status.is_success() {
                        return Err(EnrichmentError::http_status(package, status.as_u16()));
                    }

                    let body: ConfidenceResponse = response.json().await.map_err(|e| {
                        EnrichmentError::invalid_response(
                            package,
                            format!("failed to parse JSON: {}", e),
                        )
                    })?;

                    return match body.confidence {
                        Some(level) => match level.parse::<MergeConfidence>() {
                            Ok(parsed) => Ok(Some(parsed)),
                            Err(reason) => {
                                debug!(package, level = %level, reason = %reason, "unrecognized confidence level");
                                Ok(None)
                            }
                        },
                        None => Ok(None),
                    };
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(EnrichmentError::timeout(package));
                    } else {
                        last_error = Some(EnrichmentError::network(package, e.to_string()));
                    }

                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| EnrichmentError::network(package, "unknown error".to_string())))
    }
}

#[async_trait]
impl MergeConfidenceLookup for HttpConfidenceClient {
    async fn lookup(
        &self,
        request: &ConfidenceRequest<'_>,
    ) -> Result<Option<MergeConfidence>, EnrichmentError> {
        let url = self.transition_url(request);
        self.fetch_level(&url, request.package_name).await
    }
}
