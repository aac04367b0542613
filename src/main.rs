//! Portal Toast - self-expiring notification queue for the admin portal.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use portal_toast as app;

use app::config::{AppConfig, ConfigLoadResult};
use app::headless;
use app::notification::NotificationQueue;
use app::ui::ToastDemoApp;

/// Self-expiring toast notifications for the admin portal.
#[derive(Parser)]
#[command(name = "portal-toast")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Read `category message` lines from stdin and print queue snapshots as JSON
    #[arg(long)]
    headless: bool,

    /// Explicit config file path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = match (&cli.config, cli.dev) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from("config.toml"),
        (None, false) => AppConfig::default_path(),
    };

    // Config is read before logging starts; problems are reported once it is up
    let load_result = AppConfig::try_load(&config_path);
    let config = match &load_result {
        ConfigLoadResult::Loaded(config) => config.clone(),
        _ => AppConfig::default(),
    };

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.level.to_ascii_lowercase()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    tracing::info!("Portal Toast starting...");
    tracing::info!("Config path: {:?}", config_path);
    match load_result {
        ConfigLoadResult::Loaded(_) => tracing::info!("Config loaded successfully"),
        ConfigLoadResult::Missing => tracing::info!("Config missing, using defaults"),
        ConfigLoadResult::Invalid(e) => tracing::warn!("Config invalid, using defaults: {}", e),
    }

    if cli.headless {
        run_headless(config)
    } else {
        run_desktop(config).map_err(|e| anyhow::anyhow!("GUI error: {e}"))
    }
}

/// Stream queue snapshots for stdin-driven toasts.
fn run_headless(config: AppConfig) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let queue = NotificationQueue::with_config(rt.handle().clone(), &config.notifications);
    rt.block_on(headless::run(queue)).context("Headless run failed")
}

/// Run the desktop window.
fn run_desktop(config: AppConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Portal Toast")
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    // Create tokio runtime for expiry timers
    let rt = tokio::runtime::Runtime::new().map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;

    eframe::run_native(
        "Portal Toast",
        options,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(ToastDemoApp::new(&cc.egui_ctx, rt, config)))
        }),
    )
}
