//! Statuswatch Agent
//!
//! A long-running agent that watches one user's submissions on the review
//! service and posts every status change to a chat.
//!
//! Architecture:
//! - Configuration: flags and environment variables, with `.env` support
//! - Bootstrap: refuses to start without the required secrets
//! - Repositories: HTTP access to the review service and the bot API
//! - Services: rendering and delivering notifications, failure reports
//! - Scheduler: the fixed-interval poll loop and its cursor
//!
//! Everything runs sequentially on a single-threaded runtime.

mod bootstrap;
mod config;
mod error;
mod repository;
mod scheduler;
mod service;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Cli, Config};
use crate::repository::{MessageRepository, StatusRepository};
use statuswatch_client::{BotClient, ReviewClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Secrets usually come from a .env file next to the binary
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&cli.log_level))
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting statuswatch agent");
    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("Failed to load .env file: {}", e);
        }
    }

    let config = Config::from_cli(&cli);
    config.validate().context("Invalid configuration")?;
    info!(
        "Loaded configuration: endpoint={}, poll_interval={:?}, report_failures={}",
        config.endpoint, config.poll_interval, config.report_failures
    );

    let mut poller = bootstrap::start(&config, connect)?;
    info!(
        "Poller ready (state: {:?}, cursor: {})",
        poller.state(),
        poller.cursor()
    );

    if cli.once {
        poller.run_once().await?;
        return Ok(());
    }

    tokio::select! {
        _ = poller.run() => {}
        result = shutdown_signal() => {
            result?;
        }
    }

    info!("Statuswatch agent stopped at cursor {}", poller.cursor());
    Ok(())
}

/// Builds the HTTP-backed repositories from the configuration
fn connect(config: &Config) -> (Arc<dyn StatusRepository>, Arc<dyn MessageRepository>) {
    let http = statuswatch_client::http_client(config.request_timeout);

    let statuses = ReviewClient::with_client(
        config.endpoint.clone(),
        config.practicum_token.clone(),
        http.clone(),
    );
    let messages = BotClient::with_client(
        config.telegram_api_url.clone(),
        config.telegram_token.clone(),
        http,
    );

    (Arc::new(statuses), Arc::new(messages))
}

/// Resolves on SIGINT or SIGTERM
#[cfg(unix)]
async fn shutdown_signal() -> Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate()).context("Failed to register SIGTERM")?;
    let mut sigint = signal(SignalKind::interrupt()).context("Failed to register SIGINT")?;

    tokio::select! {
        _ = sigterm.recv() => info!("Received SIGTERM"),
        _ = sigint.recv() => info!("Received SIGINT"),
    }

    Ok(())
}

#[cfg(not(unix))]
async fn shutdown_signal() -> Result<()> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Received Ctrl-C");
    Ok(())
}
