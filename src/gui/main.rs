// GUI entry point for image-resizer
// Thin front end: directory pickers, size selection and a progress bar

use eframe::egui;

mod app;
use app::ResizerApp;

fn main() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 420.0])
            .with_min_inner_size([420.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Image Resizer",
        options,
        Box::new(|cc| Ok(Box::new(ResizerApp::new(cc)))),
    )
}
