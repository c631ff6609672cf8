use crate::config::InfluxConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Body, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum InfluxError {
    /// InfluxDB answered with something other than `204 No Content`.
    #[error("influxdb returned {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("influxdb request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl HealthCheck {
    pub fn is_pass(&self) -> bool {
        self.status.eq_ignore_ascii_case("pass")
    }
}

/// Thin client over the v2 write and health endpoints.
#[derive(Clone)]
pub struct InfluxClient {
    client: Client,
    config: InfluxConfig,
}

impl InfluxClient {
    pub fn new(config: InfluxConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    pub fn config(&self) -> &InfluxConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.url.trim_end_matches('/'), path)
    }

    /// Forwards a line-protocol body to `/api/v2/write` with nanosecond precision.
    pub async fn write(&self, body: impl Into<Body>) -> Result<(), InfluxError> {
        let response = self
            .client
            .post(self.url("/api/v2/write"))
            .query(&[
                ("org", self.config.org.as_str()),
                ("bucket", self.config.bucket.as_str()),
                ("precision", "ns"),
            ])
            .header(AUTHORIZATION, format!("Token {}", self.config.token))
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            debug!(bucket = %self.config.bucket, "write accepted");
            return Ok(());
        }
        let body = response.text().await?;
        Err(InfluxError::Rejected { status: status.as_u16(), body })
    }

    /// InfluxDB answers `/health` with a JSON body even when unhealthy, so
    /// the status code is not checked here.
    pub async fn health(&self) -> Result<HealthCheck, InfluxError> {
        let check = self
            .client
            .get(self.url("/health"))
            .send()
            .await?
            .json::<HealthCheck>()
            .await?;
        Ok(check)
    }
}
