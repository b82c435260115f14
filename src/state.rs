use std::path::Path;

use anyhow::{Context, Result};

use iris_explorer::AnalysisError;
use iris_explorer::analysis::{
    BoxStats, CorrelationMatrix, FeatureStats, Histogram, ProjectionResult, Selection, Summary,
    correlate, feature_boxes, feature_histograms, feature_stats, filter, full_selection, project,
    scatter_points, summarize,
};
use iris_explorer::config::DashboardConfig;
use iris_explorer::data::{Dataset, Feature, Sample, Species};
use iris_explorer::export;
use iris_explorer::insights::View;

use crate::color::SpeciesColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Everything below `selection` is derived: [`AppState::refresh`] rebuilds it
/// from the analysis core after each interaction.
pub struct AppState {
    pub dataset: Dataset,
    pub config: DashboardConfig,
    pub colors: SpeciesColors,

    /// Species included in every view. Never empty.
    pub selection: Selection,
    pub view: View,
    pub scatter_x: Feature,
    pub scatter_y: Feature,

    pub subset: Vec<Sample>,
    pub summary: Summary,
    pub correlation: CorrelationMatrix,
    pub projection: Result<ProjectionResult, AnalysisError>,
    pub histograms: Vec<(Feature, Vec<(Species, Histogram)>)>,
    pub boxes: Vec<(Feature, Vec<(Species, BoxStats)>)>,
    pub stats: Vec<(Feature, Option<FeatureStats>)>,
    pub scatter: Vec<(Species, Vec<[f64; 2]>)>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Dataset, config: DashboardConfig) -> Self {
        let selection = config.initial_selection();
        let mut state = Self {
            colors: SpeciesColors::new(&config.colors),
            scatter_x: config.scatter_x,
            scatter_y: config.scatter_y,
            view: View::Histograms,
            subset: Vec::new(),
            summary: summarize(&[]),
            correlation: correlate(&[]),
            projection: project(&[]),
            histograms: Vec::new(),
            boxes: Vec::new(),
            stats: Vec::new(),
            scatter: Vec::new(),
            status_message: None,
            dataset,
            config,
            selection,
        };
        state.refresh();
        state
    }

    /// Recompute every derived view from the current selection.
    pub fn refresh(&mut self) {
        let subset = match filter(&self.dataset, &self.selection) {
            Ok(subset) => subset,
            Err(e) => {
                log::error!("Refusing to refresh: {e}");
                self.status_message = Some(format!("Error: {e}"));
                return;
            }
        };

        let bins = self.config.histogram_bins;
        let whis = self.config.whisker_range;
        self.summary = summarize(&subset);
        self.correlation = correlate(&subset);
        self.projection = project(&subset);
        self.histograms = Feature::ALL
            .into_iter()
            .map(|f| (f, feature_histograms(&subset, f, bins)))
            .collect();
        self.boxes = Feature::ALL
            .into_iter()
            .map(|f| (f, feature_boxes(&subset, f, whis)))
            .collect();
        self.stats = Feature::ALL
            .into_iter()
            .map(|f| (f, feature_stats(&subset, f).ok()))
            .collect();
        self.subset = subset;
        self.refresh_scatter();

        log::debug!(
            "Selection {:?}: {} samples, projection {}",
            self.selection,
            self.summary.count,
            match &self.projection {
                Ok(p) => format!("{:.1}% explained", p.total_explained() * 100.0),
                Err(e) => e.to_string(),
            }
        );
    }

    fn refresh_scatter(&mut self) {
        self.scatter = scatter_points(&self.subset, self.scatter_x, self.scatter_y);
    }

    pub fn set_scatter_axes(&mut self, x: Feature, y: Feature) {
        self.scatter_x = x;
        self.scatter_y = y;
        self.refresh_scatter();
    }

    /// Toggle one species. Removing the last selected species is refused.
    pub fn toggle_species(&mut self, species: Species) {
        if self.selection.contains(&species) {
            if self.selection.len() == 1 {
                log::warn!("Ignoring request to deselect the last species ({species})");
                self.status_message = Some("Select at least one species.".to_string());
                return;
            }
            self.selection.remove(&species);
        } else {
            self.selection.insert(species);
        }
        self.status_message = None;
        self.refresh();
    }

    /// Select every species.
    pub fn select_all(&mut self) {
        self.selection = full_selection();
        self.status_message = None;
        self.refresh();
    }

    /// Restore the configured default selection.
    pub fn reset_selection(&mut self) {
        self.selection = self.config.initial_selection();
        self.status_message = None;
        self.refresh();
    }

    /// Export the current subset with its projection.
    pub fn export_to(&self, path: &Path) -> Result<()> {
        let projection = self
            .projection
            .as_ref()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .context("nothing to export")?;
        export::write(path, &self.subset, projection)
    }
}
