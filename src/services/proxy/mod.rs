//! HTTP write proxy: accepts line protocol from the entry form and forwards
//! it to InfluxDB with the server-side credentials.
//!
//! # Endpoints
//!
//! - `GET /` - service description
//! - `GET /health` - liveness
//! - `GET /ready` - readiness, backed by InfluxDB's own `/health`
//! - `POST /write-line-protocol` - forward a `text/plain` body to `/api/v2/write`

pub mod error;
pub mod handlers;

pub use error::ProxyError;

use crate::config::ProxyConfig;
use crate::services::influx::InfluxClient;
use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub const WRITE_PATH: &str = "/write-line-protocol";

#[derive(Clone)]
pub struct AppState {
    pub influx: InfluxClient,
}

impl AppState {
    pub fn new(influx: InfluxClient) -> Self {
        Self { influx }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .route(WRITE_PATH, post(handlers::write_line_protocol))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), ProxyError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ProxyError::Serve)
}

/// Binds `config.addr()` and serves until Ctrl-C.
pub async fn run(config: ProxyConfig) -> Result<(), ProxyError> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ProxyError::Bind { addr: addr.clone(), source })?;

    info!("write proxy: http://{}{}", addr, WRITE_PATH);
    info!("influxdb: {} (org={}, bucket={})", config.influx.url, config.influx.org, config.influx.bucket);

    let state = AppState::new(InfluxClient::new(config.influx));
    serve(listener, state, shutdown_signal()).await?;

    info!("write proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("ctrl-c handler failed: {}", e);
        std::future::pending::<()>().await;
    }
}
