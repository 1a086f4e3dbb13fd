mod app;
mod chart;
mod color;
mod config;
mod data;
mod format;
mod state;
mod ui;

use app::FiscalPanelApp;
use clap::Parser;
use config::Args;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();
    log::debug!("starting with {args:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Fiscal Panel – Indicators by Entity",
        options,
        Box::new(move |_cc| Ok(Box::new(FiscalPanelApp::new(&args)))),
    )
}
