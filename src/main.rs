use orgviz::config::PipelineConfig;
use orgviz::http::HttpServer;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("orgviz v{}", orgviz::version());

    let mut config = PipelineConfig::default();
    // Optional default sources let the view route render without an upload.
    if let Ok(path) = std::env::var("ORGVIZ_SCORE_SOURCE") {
        config.score_source = Some(PathBuf::from(path));
    }
    if let Ok(path) = std::env::var("ORGVIZ_HIERARCHY_SOURCE") {
        config.hierarchy_source = Some(PathBuf::from(path));
    }
    if let Ok(dir) = std::env::var("ORGVIZ_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    if let Ok(font) = std::env::var("ORGVIZ_FONT") {
        config.font_family = Some(font);
    }
    let port = std::env::var("ORGVIZ_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let server = HttpServer::new(config, port);
    server.start().await?;
    Ok(())
}
