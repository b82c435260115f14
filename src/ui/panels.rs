use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use iris_explorer::data::Species;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – species filter
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Iris Explorer");
    ui.label("An educational dashboard for exploring the classic Iris dataset.");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let n_selected = state.selection.len();
            let n_total = Species::ALL.len();
            ui.strong(format!("Species  ({n_selected}/{n_total})"));

            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("Reset").clicked() {
                    state.reset_selection();
                }
            });

            for species in Species::ALL {
                let mut checked = state.selection.contains(&species);
                let text = RichText::new(species.name()).color(state.colors.color_for(species));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_species(species);
                }
            }

            ui.separator();
            ui.strong("About the dataset");
            ui.label(
                "Collected by Ronald Fisher in 1936. It holds 150 samples of three iris \
                 species with 4 measurements each, and is one of the best-known datasets \
                 in machine learning.",
            );
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / metrics row.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let s = &state.summary;
        ui.label(format!("Samples: {}", s.count));
        ui.separator();
        ui.label(format!("Species: {}", s.distinct_labels));
        ui.separator();
        ui.label(format!("Features: {}", s.feature_count));
        ui.separator();
        ui.label(format!("Missing values: {}", s.missing_values));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered data with PCA coordinates")
        .set_file_name("iris_projection.csv")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .save_file();

    if let Some(path) = file {
        match state.export_to(&path) {
            Ok(()) => {
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
