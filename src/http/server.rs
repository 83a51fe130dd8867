//! HTTP server for the organization chart

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use super::handler::{index_handler, status_handler, upload_handler, AppState};
use crate::config::PipelineConfig;

/// Build the application router over a pipeline configuration.
pub fn router(config: PipelineConfig) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/upload", post(upload_handler))
        .route("/api/status", get(status_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(AppState { config }))
}

/// HTTP server managing the chart view and upload routes.
pub struct HttpServer {
    config: PipelineConfig,
    port: u16,
}

impl HttpServer {
    pub fn new(config: PipelineConfig, port: u16) -> Self {
        Self { config, port }
    }

    /// Bind and serve until shutdown.
    pub async fn start(&self) -> std::io::Result<()> {
        let app = router(self.config.clone());
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("organization chart available at http://localhost:{}", self.port);

        axum::serve(listener, app).await
    }
}
