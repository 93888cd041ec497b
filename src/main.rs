use eframe::egui;
use rusty_report::app::DataProcessorApp;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 560.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Data Processor",
        options,
        Box::new(|_cc| Ok(Box::new(DataProcessorApp::default()))),
    )
}
