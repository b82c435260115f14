use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use iris_explorer::analysis::{COMPONENTS, CorrelationMatrix, ProjectionResult};
use iris_explorer::data::Feature;

use crate::color::heatmap_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Render the 4×4 matrix as coloured cells. Undefined pairs are gray.
pub fn correlation_heatmap(ui: &mut Ui, corr: &CorrelationMatrix) {
    egui::Grid::new("correlation_heatmap")
        .spacing([6.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for f in Feature::ALL {
                ui.strong(f.label());
            }
            ui.end_row();

            for (a, row) in Feature::ALL.iter().zip(corr.rows()) {
                ui.strong(a.label());
                for value in row {
                    let text = match value {
                        Some(r) => format!("{r:>6.2}"),
                        None => format!("{:>6}", "-"),
                    };
                    ui.label(
                        RichText::new(text)
                            .monospace()
                            .strong()
                            .color(Color32::BLACK)
                            .background_color(heatmap_color(*value)),
                    );
                }
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// PCA loadings
// ---------------------------------------------------------------------------

pub fn loadings_table(ui: &mut Ui, projection: &ProjectionResult) {
    ui.strong("Loadings");
    egui::Grid::new("pca_loadings")
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for c in 0..COMPONENTS {
                ui.strong(format!("PC{}", c + 1));
            }
            ui.end_row();
            for f in Feature::ALL {
                ui.label(f.label());
                for c in 0..COMPONENTS {
                    ui.monospace(format!("{:>7.3}", projection.loading(f, c)));
                }
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Data view
// ---------------------------------------------------------------------------

/// Per-feature statistics followed by the filtered rows.
pub fn data_view(ui: &mut Ui, state: &AppState) {
    egui::Grid::new("feature_stats")
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            for header in ["Feature", "Mean", "Std", "Min", "Median", "Max"] {
                ui.strong(header);
            }
            ui.end_row();
            for (feature, stats) in &state.stats {
                ui.label(feature.label());
                match stats {
                    Some(s) => {
                        ui.monospace(format!("{:.3}", s.mean));
                        ui.monospace(s.std.map_or_else(|| "-".to_string(), |v| format!("{v:.3}")));
                        ui.monospace(format!("{:.1}", s.min));
                        ui.monospace(format!("{:.2}", s.median));
                        ui.monospace(format!("{:.1}", s.max));
                    }
                    None => {
                        ui.label("-");
                    }
                }
                ui.end_row();
            }
        });

    ui.add_space(8.0);

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(40.0))
        .columns(Column::auto().at_least(90.0), Feature::ALL.len())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("#");
            });
            for f in Feature::ALL {
                header.col(|ui: &mut Ui| {
                    ui.strong(f.axis_label());
                });
            }
            header.col(|ui: &mut Ui| {
                ui.strong("Species");
            });
        })
        .body(|body| {
            body.rows(18.0, state.subset.len(), |mut row| {
                let sample = state.subset[row.index()];
                let index = row.index() + 1;
                row.col(|ui: &mut Ui| {
                    ui.label(index.to_string());
                });
                for value in sample.features {
                    row.col(|ui: &mut Ui| {
                        ui.monospace(format!("{value:.1}"));
                    });
                }
                row.col(|ui: &mut Ui| {
                    ui.colored_label(state.colors.color_for(sample.species), sample.species.name());
                });
            });
        });
}
