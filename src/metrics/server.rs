//! HTTP exporter: Prometheus text on `/metrics`, stream health on `/health`.

use crate::metrics::{MetricsRegistry, MetricsSnapshot};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

/// Errors from running the exporter.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Binding or serving on the socket failed.
    #[error("metrics server i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for the metrics server.
#[derive(Debug, Clone)]
pub struct MetricsServerConfig {
    /// Address to bind the server to.
    pub bind_addr: SocketAddr,
}

impl Default for MetricsServerConfig {
    fn default() -> Self {
        Self::with_port(9090)
    }
}

impl MetricsServerConfig {
    /// Loopback address on `port`.
    pub fn with_port(port: u16) -> Self {
        Self {
            bind_addr: ([127, 0, 0, 1], port).into(),
        }
    }
}

/// Stream health as reported on `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamHealth {
    /// A stream is attached.
    Active,
    /// Nothing attached and the last start did not fail.
    Idle,
    /// Nothing attached because the last start failed.
    Failed,
}

impl StreamHealth {
    /// Derives health from the latest service snapshot.
    pub fn from_snapshot(snapshot: &MetricsSnapshot) -> Self {
        if snapshot.stream_active {
            StreamHealth::Active
        } else if snapshot.start_failed {
            StreamHealth::Failed
        } else {
            StreamHealth::Idle
        }
    }

    fn status(self) -> (StatusCode, &'static str) {
        match self {
            StreamHealth::Active => (StatusCode::OK, "active"),
            StreamHealth::Idle => (StatusCode::OK, "idle"),
            StreamHealth::Failed => (StatusCode::SERVICE_UNAVAILABLE, "failed"),
        }
    }
}

/// Registry plus the snapshot it was last updated from.
pub struct MetricsState {
    registry: MetricsRegistry,
    latest: MetricsSnapshot,
}

impl MetricsState {
    /// Records a new snapshot and pushes it into the registry.
    pub fn update(&mut self, snapshot: &MetricsSnapshot) {
        self.registry.update(snapshot);
        self.latest = snapshot.clone();
    }

    /// Health derived from the latest snapshot.
    pub fn health(&self) -> StreamHealth {
        StreamHealth::from_snapshot(&self.latest)
    }
}

/// HTTP server exposing `/metrics` and `/health`.
pub struct MetricsServer {
    config: MetricsServerConfig,
    state: Arc<RwLock<MetricsState>>,
}

impl MetricsServer {
    /// Creates a server around `registry`; health starts out idle.
    pub fn new(config: MetricsServerConfig, registry: MetricsRegistry) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(MetricsState {
                registry,
                latest: MetricsSnapshot::default(),
            })),
        }
    }

    /// Shared state; write a fresh snapshot into it after each service call.
    pub fn state(&self) -> Arc<RwLock<MetricsState>> {
        Arc::clone(&self.state)
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/metrics", get(metrics_handler))
            .route("/health", get(health_handler))
            .layer(CorsLayer::permissive())
            .with_state(Arc::clone(&self.state))
    }

    /// Serves until the listener fails.
    pub async fn run(self) -> Result<(), ServerError> {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        tracing::info!(addr = %self.config.bind_addr, "Metrics server listening");
        axum::serve(listener, app).await?;
        Ok(())
    }
}

async fn metrics_handler(State(state): State<Arc<RwLock<MetricsState>>>) -> impl IntoResponse {
    match state.read().await.registry.encode() {
        Ok(output) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            output,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {}", e),
        ),
    }
}

async fn health_handler(State(state): State<Arc<RwLock<MetricsState>>>) -> impl IntoResponse {
    state.read().await.health().status()
}
