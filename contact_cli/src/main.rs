use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use contact_cli::logging::init_file_logging;
use contact_cli::ui::tui_app::TuiApp;
use contact_core::{ContactWidget, FastRandSource, WidgetConfig};

#[derive(Parser)]
#[command(name = "tlc-contact")]
#[command(about = "Together Learning contact form in the terminal", long_about = None)]
struct Cli {
    /// Backend origin, overrides TLC_BACKEND_URL and the config file
    #[arg(long)]
    backend_url: Option<String>,

    /// Config file (defaults to ~/.tlc_contact/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Seed for the particle burst
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match init_file_logging(cli.debug) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("⚠️ Failed to initialize logger: {:#}", e);
            None
        }
    };

    let config = WidgetConfig::resolve(cli.config.as_deref(), cli.backend_url)
        .context("Failed to load widget config")?;

    tracing::info!("Starting contact widget against {}", config.endpoint());

    let mut widget = ContactWidget::new(config);
    if let Some(seed) = cli.seed {
        widget = widget.with_random_source(FastRandSource::with_seed(seed));
    }

    let mut tui = TuiApp::new(widget)?;
    tui.run().await?;

    Ok(())
}
