use crate::protocol::EncodedLine;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Where the form posts by default: the write proxy on its default port.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/write-line-protocol";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    /// The endpoint answered with a non-2xx status. `body` is the raw response text.
    #[error("write rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
    /// No response: connection refused, DNS failure, timeout.
    #[error("network error: {0}")]
    Network(String),
}

/// Sink for encoded lines. The form session submits through this.
pub trait LineWriter {
    fn write_line(&self, line: &EncodedLine) -> impl Future<Output = Result<(), WriteError>> + Send;
}

/// Posts each line as a `text/plain` body. One request per call, no retry.
#[derive(Clone)]
pub struct HttpLineWriter {
    client: Client,
    endpoint: String,
}

impl HttpLineWriter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, Duration::from_secs(10))
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpLineWriter {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl LineWriter for HttpLineWriter {
    async fn write_line(&self, line: &EncodedLine) -> Result<(), WriteError> {
        debug!(endpoint = %self.endpoint, line = %line, "posting line");

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/plain")
            .body(line.as_str().to_owned())
            .send()
            .await
            .map_err(|e| {
                warn!("write request failed: {}", e);
                WriteError::Network(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // A body that cannot be read is reported as empty; the status still tells the story.
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "write rejected");
        Err(WriteError::Rejected { status: status.as_u16(), body })
    }
}
