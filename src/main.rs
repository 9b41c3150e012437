// Main entry point - Dependency injection and pipeline run
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::{BuildSummary, DashboardService};
use crate::application::loaders::MetricLoader;
use crate::application::publisher::DashboardPublisher;
use crate::infrastructure::config::load_pipeline_config;
use crate::infrastructure::inbox_repository::FsInboxRepository;
use crate::infrastructure::json_publisher::JsonFilePublisher;
use crate::presentation::html_snapshot::HtmlSnapshotPublisher;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the summary line
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(summary) => {
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("Dashboard build failed: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<BuildSummary> {
    // Load configuration
    let config = load_pipeline_config().context("loading configuration")?;
    tracing::debug!("Pipeline configuration: {:?}", config);

    // Create repository (infrastructure layer)
    let repository = Arc::new(FsInboxRepository::new(config.inbox_dir.clone()));

    // Create publishers; the JSON document always goes first
    let mut publishers: Vec<Arc<dyn DashboardPublisher>> =
        vec![Arc::new(JsonFilePublisher::new(config.output_path.clone()))];
    if let Some(html_path) = &config.html_output_path {
        publishers.push(Arc::new(HtmlSnapshotPublisher::new(html_path.clone())));
    }

    // Create service (application layer)
    let loader = MetricLoader::new(repository, config.invalid_numbers);
    let service = DashboardService::new(loader, publishers, config);

    Ok(service.run().await?)
}
