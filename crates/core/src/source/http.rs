//! HTTP implementation of the upstream ticket source.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::UpstreamConfig;

use super::{PollBatch, SearchId, SourceError, TicketSource};

/// Reqwest-based ticket source talking to the real search service.
pub struct HttpTicketSource {
    client: Client,
    config: UpstreamConfig,
}

impl HttpTicketSource {
    /// Create a new source with the given configuration.
    pub fn new(config: UpstreamConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn map_transport_error(e: reqwest::Error) -> SourceError {
        if e.is_timeout() {
            SourceError::Timeout
        } else {
            SourceError::Connection(e.to_string())
        }
    }
}

/// Response body of `GET /search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartSearchResponse {
    search_id: SearchId,
}

#[async_trait]
impl TicketSource for HttpTicketSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn start_search(&self) -> Result<SearchId, SourceError> {
        let url = format!("{}/search", self.base_url());
        debug!(url = %url, "Requesting search session");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            if status.is_server_error() {
                return Err(SourceError::Server {
                    status: status.as_u16(),
                });
            }
            return Err(SourceError::Request {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Connection(e.to_string()))?;
        let parsed: StartSearchResponse = serde_json::from_str(&body)
            .map_err(|e| SourceError::MalformedBody(e.to_string()))?;

        debug!(search_id = %parsed.search_id, "Search session acquired");
        Ok(parsed.search_id)
    }

    async fn poll(&self, search_id: &SearchId) -> Result<PollBatch, SourceError> {
        let url = format!("{}/tickets", self.base_url());

        let response = self
            .client
            .get(&url)
            .query(&[("searchId", search_id.0.as_str())])
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            if status.is_server_error() {
                return Err(SourceError::Server {
                    status: status.as_u16(),
                });
            }
            return Err(SourceError::Request {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Connection(e.to_string()))?;
        let batch: PollBatch = serde_json::from_str(&body)
            .map_err(|e| SourceError::MalformedBody(e.to_string()))?;

        debug!(
            tickets = batch.tickets.len(),
            stop = batch.stop,
            "Poll complete"
        );
        Ok(batch)
    }
}
