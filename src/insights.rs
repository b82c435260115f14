//! Educational notes shown next to each view.

use serde::{Deserialize, Serialize};

use crate::analysis::{CorrelationMatrix, ProjectionResult};

/// The dashboard views, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Histograms,
    Scatter,
    Correlation,
    BoxPlots,
    Pca,
    Data,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Histograms,
        View::Scatter,
        View::Correlation,
        View::BoxPlots,
        View::Pca,
        View::Data,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Histograms => "Distributions",
            View::Scatter => "Scatter plot",
            View::Correlation => "Correlations",
            View::BoxPlots => "Box plots",
            View::Pca => "PCA",
            View::Data => "Data",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            View::Histograms => {
                "Histograms show how the values of each feature are spread. Do the species overlap?"
            }
            View::Scatter => "Compare any two features against each other.",
            View::Correlation => {
                "Correlation shows how strongly two features move together (from -1 to 1)."
            }
            View::BoxPlots => "A box plot shows the median, quartiles and outliers of each species.",
            View::Pca => {
                "Principal Component Analysis reduces the 4 features to 2 principal components \
                 while keeping as much information as possible, so the data can be viewed in 2D."
            }
            View::Data => "The filtered measurements and per-feature statistics.",
        }
    }

    /// Fixed note for the view; `None` where the note depends on the data.
    pub fn note(self) -> Option<&'static str> {
        match self {
            View::Histograms => Some(
                "Setosa is clearly separated from the other species, especially in the petal features.",
            ),
            View::Scatter => {
                Some("Tip: pick the two petal features to see an almost perfect separation of the species!")
            }
            View::BoxPlots => {
                Some("Setosa has much smaller petals: its boxes do not overlap the others at all!")
            }
            View::Correlation | View::Pca | View::Data => None,
        }
    }
}

/// Note for the correlation heatmap, built from its strongest pair.
pub fn correlation_note(corr: &CorrelationMatrix) -> String {
    match corr.strongest_pair() {
        Some((a, b, r)) => {
            let direction = if r >= 0.0 { "positively" } else { "negatively" };
            format!(
                "{a} and {} are the most strongly {direction} correlated pair ({r:.2}).",
                b.label().to_lowercase()
            )
        }
        None => "No pair of features varies within this selection, so no correlation is defined."
            .to_string(),
    }
}

/// Axis label for a principal component, e.g. `PC1 (73.0% of variance)`.
pub fn component_label(pca: &ProjectionResult, component: usize) -> String {
    format!("PC{} ({:.1}% of variance)", component + 1, pca.percent(component))
}

pub fn pca_note(pca: &ProjectionResult) -> String {
    format!(
        "The first two components together explain {:.1}% of the total variability in the data.",
        pca.total_explained() * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{correlate, filter, full_selection, project};
    use crate::data::{Sample, Species, load};

    #[test]
    fn test_pca_note_full_dataset() {
        let ds = load().expect("dataset");
        let subset = filter(&ds, &full_selection()).expect("filter");
        let pca = project(&subset).expect("projection");
        assert_eq!(
            pca_note(&pca),
            "The first two components together explain 95.8% of the total variability in the data."
        );
        assert_eq!(component_label(&pca, 0), "PC1 (73.0% of variance)");
        assert_eq!(component_label(&pca, 1), "PC2 (22.9% of variance)");
    }

    #[test]
    fn test_correlation_note() {
        let ds = load().expect("dataset");
        let subset = filter(&ds, &full_selection()).expect("filter");
        let note = correlation_note(&correlate(&subset));
        assert_eq!(
            note,
            "Petal length and petal width are the most strongly positively correlated pair (0.96)."
        );

        let row = Sample {
            features: [5.0, 3.0, 1.4, 0.2],
            species: Species::Setosa,
        };
        assert!(correlation_note(&correlate(&[row])).starts_with("No pair"));
    }

    #[test]
    fn test_every_view_has_text() {
        for view in View::ALL {
            assert!(!view.title().is_empty());
            assert!(!view.description().is_empty());
        }
    }
}
