//! Campaign intake pipeline binary.
//!
//! Scans a directory of video submissions with their metadata sidecars,
//! runs each through the pipeline, and writes the session results as JSON
//! and CSV next to the scanned directory.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use milkmob_ai_client::HttpAnalysisClient;
use milkmob_metadata::MetadataStore;
use milkmob_pipeline::{PipelineConfig, PipelineSession, VideoProcessor};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("milkmob=info".parse().unwrap());

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
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting milkmob-pipeline");

    if let Err(e) = run().await {
        error!("Pipeline run failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let videos_dir = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("MILKMOB_VIDEOS_DIR").ok())
        .unwrap_or_else(|| "test_videos".to_string());
    let videos_dir = PathBuf::from(videos_dir);

    let config = PipelineConfig::from_env();
    let client = HttpAnalysisClient::from_env()?;
    let processor = VideoProcessor::new(Arc::new(client), config);

    let store = MetadataStore::new(&videos_dir);
    let submissions = store.scan().await?;
    info!(
        dir = %videos_dir.display(),
        count = submissions.len(),
        "Found video submissions"
    );

    let mut session = PipelineSession::new();
    for submission in &submissions {
        if let Err(e) = processor.process_into(submission, &mut session).await {
            // Infrastructure failure: abandon this submission, keep going.
            warn!(
                filename = %submission.filename,
                "{}",
                e.user_message()
            );
        }
    }

    let summary = session.summary();
    info!(
        total = summary.total,
        approved = summary.approved,
        quarantined = summary.quarantined,
        average_confidence = summary.average_confidence,
        "Session complete"
    );

    let json_path = videos_dir.join("campaign_results.json");
    tokio::fs::write(&json_path, session.export_json()?).await?;
    info!(path = %json_path.display(), "Wrote JSON results");

    let csv_path = videos_dir.join("campaign_results.csv");
    tokio::fs::write(&csv_path, session.export_csv()).await?;
    info!(path = %csv_path.display(), "Wrote CSV results");

    Ok(())
}
