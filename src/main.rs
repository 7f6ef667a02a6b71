/// Main application entry point
mod app;
mod clients;
mod config;
mod domain;
mod errors;
mod services;
mod ui;
mod utils;

use crate::clients::{ApodClient, NeoClient};
use crate::config::AppConfig;
use crate::services::LookupService;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to a file; stdout belongs to the screen.
    let _log_guard = init_logging()?;

    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    // Initialize clients
    let neo_client = NeoClient::new(config.neo_api_url.clone(), config.nasa_api_key.clone())?;
    let apod_client = ApodClient::new(config.apod_api_url.clone(), config.nasa_api_key.clone())?;
    let service = LookupService::new(neo_client, apod_client);

    info!("neoscope starting");
    app::run(service).await
}

fn init_logging() -> anyhow::Result<WorkerGuard> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("neoscope")
        .filename_suffix("log")
        .build("logs")?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
