use eframe::egui;

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DataProcessorApp {
    pub state: AppState,
}

impl eframe::App for DataProcessorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: file selection and actions ----
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            panels::controls(ui, &mut self.state);
        });

        // ---- Central panel: result log ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::result_log(ui, &self.state);
        });
    }
}
