use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::error::ProxyError;
use super::{AppState, WRITE_PATH};

pub async fn root() -> Json<Value> {
    Json(json!({
        "service": "influx-data-entry-api",
        "status": "ok",
        "endpoints": {
            "health": "/health",
            "ready": "/ready",
            "write": WRITE_PATH,
        },
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match state.influx.health().await {
        Ok(check) if check.is_pass() => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Ok(check) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "details": check.message })),
        ),
        Err(e) => {
            warn!("readiness probe failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "down", "error": e.to_string() })),
            )
        }
    }
}

pub async fn write_line_protocol(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ProxyError> {
    if body.is_empty() {
        return Err(ProxyError::EmptyBody);
    }
    debug!(bytes = body.len(), "forwarding write");

    if let Err(e) = state.influx.write(body).await {
        warn!("write forward failed: {}", e);
        return Err(e.into());
    }

    info!("write forwarded");
    Ok(Json(json!({ "status": "success" })))
}
