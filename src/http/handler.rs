//! HTTP handlers for the chart view and upload routes

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rust_embed::RustEmbed;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::PipelineConfig;
use crate::orgtree::HierarchySource;
use crate::pipeline::{self, PipelineError};
use crate::score::ScoreSource;

#[derive(RustEmbed)]
#[folder = "src/http/static/"]
struct Assets;

/// Shared request state.
pub struct AppState {
    pub config: PipelineConfig,
}

fn page(chart: &str) -> Html<String> {
    let template = Assets::get("index.html")
        .map(|asset| String::from_utf8_lossy(asset.data.as_ref()).to_string())
        .unwrap_or_else(|| "<html><body>{{chart}}</body></html>".to_string());
    Html(template.replace("{{chart}}", chart))
}

fn chart_img(png: &[u8]) -> String {
    format!(
        "<img class=\"chart\" alt=\"organization chart\" src=\"data:image/png;base64,{}\">",
        STANDARD.encode(png)
    )
}

fn message(text: &str) -> String {
    format!("<p class=\"message\">{}</p>", text)
}

/// Run the synchronous pipeline off the async worker and read back the
/// rendered image.
async fn derive_chart(
    config: PipelineConfig,
    score: ScoreSource,
    hierarchy: HierarchySource,
) -> Result<Vec<u8>, PipelineError> {
    tokio::task::spawn_blocking(move || {
        let output = pipeline::run(&config, &score, &hierarchy)?;
        Ok(std::fs::read(&output)?)
    })
    .await
    .map_err(|e| PipelineError::Render(format!("render task failed: {}", e)))?
}

/// View route: re-runs the pipeline from the configured default sources
/// and embeds the PNG as a base64 payload.
pub async fn index_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (Some(score_path), Some(hierarchy_path)) = (
        state.config.score_source.clone(),
        state.config.hierarchy_source.clone(),
    ) else {
        return page(&message(
            "No default sources configured. Upload a score sheet and a hierarchy sheet below.",
        ))
        .into_response();
    };

    let result = derive_chart(
        state.config.clone(),
        ScoreSource::Path(score_path),
        HierarchySource::Path(hierarchy_path),
    )
    .await;

    match result {
        Ok(png) => page(&chart_img(&png)).into_response(),
        Err(e) => {
            error!("derivation failed: {}", e);
            (StatusCode::BAD_REQUEST, page(&message(&e.to_string()))).into_response()
        }
    }
}

/// Upload route: accepts a multipart form with a `score` part and a
/// `hierarchy` part and re-runs the pipeline on the uploaded bodies.
///
/// A missing part is a user-visible validation message, not a server
/// error; no image is produced.
pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut score: Option<Vec<u8>> = None;
    let mut hierarchy: Option<Vec<u8>> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return (StatusCode::BAD_REQUEST, page(&message(&e.to_string()))).into_response()
            }
        };
        let name = field.name().map(str::to_string);
        let body = match field.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                return (StatusCode::BAD_REQUEST, page(&message(&e.to_string()))).into_response()
            }
        };
        match name.as_deref() {
            Some("score") => score = Some(body),
            Some("hierarchy") => hierarchy = Some(body),
            _ => {}
        }
    }

    let (Some(score), Some(hierarchy)) = (score, hierarchy) else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            page(&message(
                "Both the score sheet and the hierarchy sheet are required.",
            )),
        )
            .into_response();
    };

    info!(
        score_bytes = score.len(),
        hierarchy_bytes = hierarchy.len(),
        "received upload"
    );

    let result = derive_chart(
        state.config.clone(),
        ScoreSource::Bytes(score),
        HierarchySource::Bytes(hierarchy),
    )
    .await;

    match result {
        Ok(png) => page(&chart_img(&png)).into_response(),
        Err(e) => {
            error!("derivation failed: {}", e);
            (StatusCode::BAD_REQUEST, page(&message(&e.to_string()))).into_response()
        }
    }
}

/// Handler for system status.
pub async fn status_handler() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": crate::VERSION,
    }))
}
