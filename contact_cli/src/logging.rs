//! File logging for the terminal front end
//!
//! The TUI owns stdout, so every `tracing` event goes to
//! `~/.tlc_contact/logs/latest.log` instead.
//!
//! # Environment Variables
//!
//! - `TLC_DEBUG=1` - Log at debug level
//! - `RUST_LOG` - Full filter override

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const DEBUG_ENV: &str = "TLC_DEBUG";

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Whether `TLC_DEBUG=1` was set; read once
#[inline]
pub fn is_debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| debug_flag(std::env::var(DEBUG_ENV).ok().as_deref()))
}

fn debug_flag(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true"))
}

pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tlc_contact")
        .join("logs")
}

fn default_directive(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

/// Install the global subscriber; keep the guard alive until exit
pub fn init_file_logging(debug: bool) -> Result<WorkerGuard> {
    let dir = log_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let path = dir.join("latest.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug || is_debug_enabled())));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    Ok(guard)
}
