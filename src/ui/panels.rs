use eframe::egui::{self, ScrollArea, TextStyle, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top panel – file picker and actions
// ---------------------------------------------------------------------------

/// Render the upload / process controls.
pub fn controls(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(10.0);
        ui.label("Upload a CSV file:");
        ui.add_space(5.0);

        if ui.button("Browse").clicked() {
            open_file_dialog(state);
        }
        ui.add_space(10.0);

        ui.label(state.file_label());
        ui.add_space(10.0);

        // Blocks the UI until every artifact is written.
        if ui.button("Process Data").clicked() {
            state.process();
        }
        ui.add_space(5.0);
    });
}

// ---------------------------------------------------------------------------
// Central panel – read-only result text
// ---------------------------------------------------------------------------

pub fn result_log(ui: &mut Ui, state: &AppState) {
    ScrollArea::both()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui: &mut Ui| {
            let mut text = state.log.as_str();
            ui.add(
                egui::TextEdit::multiline(&mut text)
                    .font(TextStyle::Monospace)
                    .desired_width(f32::INFINITY),
            );
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CSV file")
        .add_filter("CSV files", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_file(&path);
    }
}
