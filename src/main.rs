mod app;
mod color;
mod config;
mod data;
mod error;
mod format;
mod state;
mod ui;
mod views;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use app::HealthTechApp;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let path = PathBuf::from(config::DATA_PATH);
    let dataset = match data::loader::load_file(&path)
        .with_context(|| format!("loading dataset from {}", path.display()))
    {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("Failed to load dataset: {e:#}");
            return Err(e);
        }
    };

    if dataset.is_empty() {
        log::warn!("{} holds a header but no startups", path.display());
    }

    let state = AppState::new(path, dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        config::PAGE_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(HealthTechApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
