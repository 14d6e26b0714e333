use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use datadrift_core::errors::DriftError;

use crate::request::ChartRequest;

/// Capability to turn a chart request into a published chart URL.
///
/// Injected into the pipeline so change detection and report assembly stay
/// testable without network access.
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    async fn render(&self, request: &ChartRequest) -> Result<String, ChartClientError>;
}

/// Typed HTTP client for the external chart-rendering service.
#[derive(Clone, Debug)]
pub struct ChartClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ChartClient {
    /// Creates a new client bound to the service's create endpoint.
    pub fn new(endpoint: &str) -> Result<Self, ChartClientError> {
        let endpoint = Url::parse(endpoint).map_err(|err| ChartClientError::InvalidUrl {
            url: endpoint.to_string(),
            source: err,
        })?;

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    /// Returns the configured create endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChartRenderer for ChartClient {
    /// Submits the chart for rendering and returns its published URL.
    ///
    /// Every call produces a new, independently addressable chart artifact;
    /// the service performs no deduplication and this client never retries.
    async fn render(&self, request: &ChartRequest) -> Result<String, ChartClientError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| ChartClientError::Http(err.to_string()))?;

        if !response.status().is_success() {
            return Err(ChartClientError::UnexpectedStatus {
                status: response.status(),
            });
        }

        let payload: ChartResponse = response
            .json()
            .await
            .map_err(|err| ChartClientError::Decode(err.to_string()))?;
        debug!(url = %payload.url, success = payload.success, "chart rendered");

        Ok(payload.url)
    }
}

/// Response body returned by the chart service; only the URL is consumed.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    #[serde(default)]
    success: bool,
    url: String,
}

#[derive(Debug, Error)]
pub enum ChartClientError {
    #[error("invalid chart service url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("chart HTTP request failed: {0}")]
    Http(String),
    #[error("chart service returned unexpected status {status}")]
    UnexpectedStatus { status: reqwest::StatusCode },
    #[error("failed to decode chart service response: {0}")]
    Decode(String),
}

impl From<ChartClientError> for DriftError {
    fn from(value: ChartClientError) -> Self {
        DriftError::ChartServiceError(value.to_string())
    }
}
