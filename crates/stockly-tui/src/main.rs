//! `stockly-tui`: terminal dashboard for stockly inventory.
//!
//! Nine tabs, reachable with the number keys: Dashboard, Products,
//! Categories, Warehouses, Stock Levels, Movements, Adjustments, Serial
//! Numbers, and Batch Numbers. Each tab observes one cached query; product
//! edits and adjustment reviews invalidate and refetch what is on screen.
//!
//! Logs go to a file (default `/tmp/stockly-tui.log`) so they never
//! collide with the terminal UI.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use stockly_core::{Inventory, InventoryConfig, QueryCache};

use crate::app::App;

/// Terminal dashboard for browsing and managing inventory.
#[derive(Parser, Debug)]
#[command(name = "stockly-tui", version, about)]
struct Cli {
    /// Config profile to use
    #[arg(short, long, env = "STOCKLY_PROFILE")]
    profile: Option<String>,

    /// Inventory API root, overriding the profile (e.g. http://localhost:8080/api/v1)
    #[arg(short = 'u', long, env = "STOCKLY_API_URL")]
    api_url: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/stockly-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-only tracing. Hold the guard until exit so buffered lines flush.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "stockly_tui={log_level},stockly_core={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("stockly-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Profile from the shared config file, then `--api-url` on top.
fn resolve_config(cli: &Cli) -> Result<InventoryConfig> {
    let cfg = stockly_config::load_config()?;
    let profile = cfg.profile(cli.profile.as_deref())?;
    let mut config = stockly_config::profile_to_inventory_config(&profile, &cfg.defaults)?;
    if let Some(ref raw) = cli.api_url {
        config.api_url = stockly_config::parse_api_url(raw)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks first so a failure while entering the terminal is readable.
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let config = resolve_config(&cli)?;
    info!(
        api_url = %config.api_url,
        page_size = config.page_size,
        "starting stockly-tui"
    );

    let inventory = Inventory::new(config, QueryCache::new())?;
    let mut app = App::new(inventory.clone());
    let result = app.run().await;
    inventory.shutdown();
    result
}
