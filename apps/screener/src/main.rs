mod config;
mod errors;
mod extraction;
mod job_description;
mod llm_client;
mod screening;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::job_description::JobDescription;
use crate::llm_client::LlmClient;
use crate::screening::batch::run_batch;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume screener v{}", env!("CARGO_PKG_VERSION"));

    // The only fatal failure: without a job description there is nothing to screen against.
    let job = JobDescription::load(&config.job_description_path)
        .with_context(|| {
            format!(
                "Failed to load job description from {}",
                config.job_description_path.display()
            )
        })?
        .with_default_city_tiers();

    let llm = LlmClient::new(config.llm.clone());
    info!("LLM client initialized (model: {})", llm.model());

    match run_batch(&job, &config.resumes_dir, &config.reports_dir, &llm).await {
        Ok(summary) => info!(
            "Processing complete: {} eligible, {} written, {} empty, {} without analysis, {} failed. Reports are in {}",
            summary.eligible,
            summary.written,
            summary.skipped_empty,
            summary.skipped_no_result,
            summary.failed,
            config.reports_dir.display()
        ),
        Err(e) => error!("Batch aborted: {e}"),
    }

    Ok(())
}
