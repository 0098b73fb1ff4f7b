//! Vigil automation runner.
//!
//! One-shot job that records an execution marker: start, working directory,
//! timestamp, completion. Log lines go to both stdout and a log file so the
//! run leaves a trail even when nobody is watching the terminal.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn log_path() -> PathBuf {
    std::env::var("VIGIL_AUTOMATION_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("automation.log"))
}

fn main() -> anyhow::Result<()> {
    let path = log_path();
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let (file_writer, _guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!("starting automation run");

    let cwd = std::env::current_dir().context("reading current directory")?;
    info!(dir = %cwd.display(), "working directory");
    info!(timestamp = %Local::now().to_rfc3339(), "run timestamp");

    // Automation tasks run here.

    info!("automation run completed");
    Ok(())
}
