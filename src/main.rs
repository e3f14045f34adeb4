mod app;
mod audio;
mod config;
mod eq;
mod export;
mod filter;
mod game;
mod generator;
mod parametric_eq;
mod player;
mod regions;
mod response;
mod ui;

use app::EarqApp;

fn main() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Earq",
        options,
        Box::new(|cc| Ok(Box::new(EarqApp::new(cc)))),
    )
}
