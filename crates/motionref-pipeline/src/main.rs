//! Motion replication pipeline binary.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use motionref_genai::{EnvKeyProvider, GeminiClient};
use motionref_media::load_content;
use motionref_pipeline::{MotionPipeline, PipelineConfig, Session};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("motionref=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let mut args = std::env::args().skip(1);
    let (content_path, reference_path) = match (args.next(), args.next()) {
        (Some(content), Some(reference)) => (PathBuf::from(content), PathBuf::from(reference)),
        _ => {
            eprintln!("usage: motionref <content-image-or-video> <reference-video> [output.mp4]");
            std::process::exit(2);
        }
    };
    let output_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("generated.mp4"));

    let config = PipelineConfig::from_env();
    info!("Pipeline config: {:?}", config);

    let client = match GeminiClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create API client: {}", e);
            std::process::exit(1);
        }
    };

    let session = Session::new(
        Arc::new(MotionPipeline::new(client, config)),
        Some(Arc::new(EnvKeyProvider)),
    );

    let content = match load_content(&content_path).await {
        Ok(asset) => asset,
        Err(e) => {
            error!("Failed to load content: {}", e);
            std::process::exit(1);
        }
    };
    session.set_content(content);
    session.set_reference(reference_path);

    match session.generate().await {
        Ok(Some(video)) => {
            if let Err(e) = video.save_to(&output_path).await {
                error!("Failed to save video: {}", e);
                std::process::exit(1);
            }
            info!(path = %output_path.display(), "generated video saved");
        }
        Ok(None) | Err(_) => {
            if let Some(message) = session.last_error() {
                error!("{}", message);
            }
            std::process::exit(1);
        }
    }
}
