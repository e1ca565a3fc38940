#![cfg_attr(windows, windows_subsystem = "windows")]
mod binding;
mod capture;
mod cli_app;
mod config;
mod constants;
mod engine;
mod event;
mod frame;
mod gui_app;
mod joypad;
mod keyboard;
mod network;
mod normalizer;
mod pad_state;
mod poller_worker;
mod scaling;

use anyhow::anyhow;
use cli_app::CliApp;
use config::AppConfig;
use eframe::{NativeOptions, egui};
use gui_app::GuiApp;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    // --cli runs headless with the stored joypad bindings
    if std::env::args().any(|arg| arg == "--cli") {
        return CliApp::new(cfg)?.run();
    }

    let size = [f32::from(cfg.window_width), f32::from(cfg.window_height)];
    let app = GuiApp::new(cfg)?;

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_resizable(false),
        ..Default::default()
    };

    info!("Starting GUI");
    eframe::run_native(
        "3DS Input Redirection",
        options,
        Box::new(move |_cc| Ok(Box::new(app) as Box<dyn eframe::App>)),
    )
    .map_err(|e| anyhow!("eframe error: {e}"))
}
