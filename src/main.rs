mod app;
mod color;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::IrisExplorerApp;
use eframe::egui;

use iris_explorer::config::DashboardConfig;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load().context("loading configuration")?;
    let dataset = match iris_explorer::data::load() {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("Cannot start without the bundled dataset: {e:#}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Iris Explorer",
        options,
        Box::new(|cc| Ok(Box::new(IrisExplorerApp::new(cc, dataset, config)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}
