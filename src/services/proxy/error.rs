use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::services::influx::InfluxError;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("No data provided")]
    EmptyBody,

    /// InfluxDB refused the write; its status and body are relayed as-is.
    #[error("{body}")]
    Upstream { status: u16, body: String },

    #[error("influxdb unreachable: {0}")]
    Unreachable(String),

    #[error("bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },

    #[error("serve: {0}")]
    Serve(std::io::Error),
}

impl From<InfluxError> for ProxyError {
    fn from(e: InfluxError) -> Self {
        match e {
            InfluxError::Rejected { status, body } => ProxyError::Upstream { status, body },
            InfluxError::Request(e) => ProxyError::Unreachable(e.to_string()),
        }
    }
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::EmptyBody => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::Unreachable(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Bind { .. } | ProxyError::Serve(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
