use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points};

use iris_explorer::data::{Feature, Species};
use iris_explorer::insights::{self, View};

use crate::state::AppState;
use crate::ui::tables;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Central panel – tabbed views
// ---------------------------------------------------------------------------

/// Render the tab strip and the active view.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for view in View::ALL {
            ui.selectable_value(&mut state.view, view, RichText::new(view.title()).strong());
        }
    });
    ui.separator();

    let view = state.view;
    ui.heading(view.title());
    ui.label(view.description());
    ui.add_space(6.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match view {
            View::Histograms => histograms(ui, state),
            View::Scatter => scatter(ui, state),
            View::Correlation => {
                tables::correlation_heatmap(ui, &state.correlation);
                insight(ui, &insights::correlation_note(&state.correlation));
            }
            View::BoxPlots => box_plots(ui, state),
            View::Pca => pca(ui, state),
            View::Data => tables::data_view(ui, state),
        });
}

fn insight(ui: &mut Ui, text: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(format!("Insight: {text}")).italics());
}

/// Lay the four features out as a 2×2 grid of plots.
fn feature_grid(ui: &mut Ui, mut cell: impl FnMut(&mut Ui, Feature)) {
    for row in Feature::ALL.chunks(2) {
        ui.columns(2, |cols: &mut [Ui]| {
            for (col, &feature) in cols.iter_mut().zip(row) {
                col.strong(feature.axis_label());
                cell(col, feature);
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

fn histograms(ui: &mut Ui, state: &AppState) {
    feature_grid(ui, |ui: &mut Ui, feature: Feature| {
        let Some((_, per_species)) = state.histograms.iter().find(|(f, _)| *f == feature) else {
            return;
        };
        Plot::new(("histogram", feature))
            .legend(Legend::default())
            .height(CHART_HEIGHT)
            .x_axis_label("Value (cm)")
            .y_axis_label("Samples")
            .show(ui, |plot_ui| {
                for (species, hist) in per_species {
                    let color = state.colors.color_for(*species);
                    let width = hist.bin_width();
                    let bars: Vec<Bar> = hist
                        .centers()
                        .map(|(center, count)| Bar::new(center, count as f64).width(width))
                        .collect();
                    plot_ui.bar_chart(
                        BarChart::new(bars)
                            .name(species.name())
                            .color(color.gamma_multiply(0.6)),
                    );
                }
            });
    });
    if let Some(note) = View::Histograms.note() {
        insight(ui, note);
    }
}

// ---------------------------------------------------------------------------
// Scatter plot
// ---------------------------------------------------------------------------

fn feature_combo(ui: &mut Ui, id: &str, label: &str, current: &mut Feature) -> bool {
    let mut changed = false;
    ui.label(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.label())
        .show_ui(ui, |ui: &mut Ui| {
            for feature in Feature::ALL {
                if ui.selectable_value(current, feature, feature.label()).changed() {
                    changed = true;
                }
            }
        });
    changed
}

fn species_points(
    plot_ui: &mut egui_plot::PlotUi,
    state: &AppState,
    species: Species,
    points: &[[f64; 2]],
) {
    let pts: PlotPoints = points.iter().copied().collect();
    plot_ui.points(
        Points::new(pts)
            .name(species.name())
            .color(state.colors.color_for(species))
            .radius(4.0),
    );
}

fn scatter(ui: &mut Ui, state: &mut AppState) {
    let (mut x, mut y) = (state.scatter_x, state.scatter_y);
    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        changed |= feature_combo(ui, "scatter_x", "X axis:", &mut x);
        changed |= feature_combo(ui, "scatter_y", "Y axis:", &mut y);
    });
    if changed {
        state.set_scatter_axes(x, y);
    }

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .height(CHART_HEIGHT * 1.6)
        .x_axis_label(state.scatter_x.axis_label())
        .y_axis_label(state.scatter_y.axis_label())
        .show(ui, |plot_ui| {
            for (species, points) in &state.scatter {
                species_points(plot_ui, state, *species, points);
            }
        });

    if let Some(note) = View::Scatter.note() {
        insight(ui, note);
    }
}

// ---------------------------------------------------------------------------
// Box plots
// ---------------------------------------------------------------------------

fn box_plots(ui: &mut Ui, state: &AppState) {
    feature_grid(ui, |ui: &mut Ui, feature: Feature| {
        let Some((_, per_species)) = state.boxes.iter().find(|(f, _)| *f == feature) else {
            return;
        };
        Plot::new(("box_plot", feature))
            .legend(Legend::default())
            .height(CHART_HEIGHT)
            .y_axis_label("Value (cm)")
            .show_x(false)
            .show(ui, |plot_ui| {
                for (slot, (species, stats)) in per_species.iter().enumerate() {
                    let color = state.colors.color_for(*species);
                    let x = slot as f64;
                    let spread = BoxSpread::new(
                        stats.lower_whisker,
                        stats.q1,
                        stats.median,
                        stats.q3,
                        stats.upper_whisker,
                    );
                    let elem = BoxElem::new(x, spread)
                        .name(species.name())
                        .box_width(0.6)
                        .fill(color.gamma_multiply(0.7))
                        .stroke(Stroke::new(1.5, Color32::BLACK));
                    plot_ui.box_plot(BoxPlot::new(vec![elem]).name(species.name()).color(color));

                    if !stats.outliers.is_empty() {
                        let outliers: PlotPoints = stats.outliers.iter().map(|&v| [x, v]).collect();
                        plot_ui.points(Points::new(outliers).color(color).radius(3.0));
                    }
                }
            });
    });
    if let Some(note) = View::BoxPlots.note() {
        insight(ui, note);
    }
}

// ---------------------------------------------------------------------------
// PCA
// ---------------------------------------------------------------------------

fn pca(ui: &mut Ui, state: &AppState) {
    let projection = match &state.projection {
        Ok(p) => p,
        Err(e) => {
            ui.label(RichText::new(format!("PCA unavailable: {e}")).color(Color32::RED));
            return;
        }
    };

    Plot::new("pca_plot")
        .legend(Legend::default())
        .height(CHART_HEIGHT * 1.6)
        .x_axis_label(insights::component_label(projection, 0))
        .y_axis_label(insights::component_label(projection, 1))
        .show(ui, |plot_ui| {
            for species in Species::ALL {
                let points: Vec<[f64; 2]> = state
                    .subset
                    .iter()
                    .zip(&projection.coords)
                    .filter(|(s, _)| s.species == species)
                    .map(|(_, &p)| p)
                    .collect();
                if !points.is_empty() {
                    species_points(plot_ui, state, species, &points);
                }
            }
        });

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong(format!("PC1 explains {:.1}% of variance", projection.percent(0)));
        cols[1].strong(format!("PC2 explains {:.1}% of variance", projection.percent(1)));
    });

    ui.add_space(6.0);
    tables::loadings_table(ui, projection);
    insight(ui, &insights::pca_note(projection));
}
