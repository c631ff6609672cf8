#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use influx_entry::config::InfluxConfig;
use influx_entry::services::influx::InfluxClient;
use influx_entry::services::proxy::{self, AppState};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// One request received by the fake InfluxDB write endpoint.
#[derive(Debug, Clone)]
pub struct CapturedWrite {
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// Just enough of InfluxDB v2 for the proxy: `/api/v2/write` and `/health`.
#[derive(Clone)]
pub struct StubInflux {
    pub writes: Arc<Mutex<Vec<CapturedWrite>>>,
    reply: Arc<Mutex<(u16, String)>>,
    health: Arc<Mutex<Value>>,
}

impl StubInflux {
    pub fn new() -> Self {
        Self {
            writes: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(Mutex::new((204, String::new()))),
            health: Arc::new(Mutex::new(json!({
                "name": "influxdb",
                "message": "ready for queries and writes",
                "status": "pass",
            }))),
        }
    }

    pub fn reply_with(&self, status: u16, body: &str) {
        *self.reply.lock().unwrap() = (status, body.to_string());
    }

    pub fn health_with(&self, status: &str, message: &str) {
        *self.health.lock().unwrap() = json!({ "name": "influxdb", "message": message, "status": status });
    }

    pub fn writes(&self) -> Vec<CapturedWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub async fn spawn(&self) -> SocketAddr {
        let router = Router::new()
            .route("/api/v2/write", post(stub_write))
            .route("/health", get(stub_health))
            .with_state(self.clone());
        spawn_router(router).await
    }
}

async fn stub_write(
    State(stub): State<StubInflux>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    stub.writes.lock().unwrap().push(CapturedWrite {
        query,
        authorization: header("authorization"),
        content_type: header("content-type"),
        body,
    });
    let (status, body) = stub.reply.lock().unwrap().clone();
    (StatusCode::from_u16(status).unwrap(), body)
}

async fn stub_health(State(stub): State<StubInflux>) -> Json<Value> {
    Json(stub.health.lock().unwrap().clone())
}

pub async fn spawn_router(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub fn influx_config(url: String) -> InfluxConfig {
    InfluxConfig {
        url,
        token: "test-token".to_string(),
        org: "test-org".to_string(),
        bucket: "test-bucket".to_string(),
    }
}

/// Starts the write proxy in front of `influx_url`.
pub async fn spawn_proxy(influx_url: String) -> SocketAddr {
    let state = AppState::new(InfluxClient::new(influx_config(influx_url)));
    spawn_router(proxy::router(state)).await
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
