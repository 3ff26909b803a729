// GUI-subsystem binary on Windows: no console window is ever allocated.
#![windows_subsystem = "windows"]

mod app;

use app::HistoViewApp;
use eframe::egui;
use histoview::logger;

fn main() -> Result<(), eframe::Error> {
    // Initialize session log (overwrites previous session log)
    logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_title("HistoView"),
        ..Default::default()
    };

    eframe::run_native(
        "HistoView",
        options,
        Box::new(|_cc| Box::new(HistoViewApp::default())),
    )
}
