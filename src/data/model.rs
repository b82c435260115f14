use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Species – the categorical label column
// ---------------------------------------------------------------------------

/// One of the three iris species in the dataset.
///
/// The derived `Ord` is the canonical display order used everywhere a
/// per-species breakdown is produced (Setosa, Versicolor, Virginica).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    pub fn name(self) -> &'static str {
        match self {
            Species::Setosa => "Setosa",
            Species::Versicolor => "Versicolor",
            Species::Virginica => "Virginica",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Species {
    type Err = AnalysisError;

    /// Case-insensitive; accepts the `Iris-` prefix used by the UCI files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed
            .strip_prefix("Iris-")
            .or_else(|| trimmed.strip_prefix("iris-"))
            .unwrap_or(trimmed);
        Species::ALL
            .into_iter()
            .find(|sp| sp.name().eq_ignore_ascii_case(bare))
            .ok_or_else(|| AnalysisError::InvalidSelection(format!("unknown species '{trimmed}'")))
    }
}

// ---------------------------------------------------------------------------
// Feature – the four numeric columns
// ---------------------------------------------------------------------------

/// Number of numeric feature columns.
pub const FEATURE_COUNT: usize = 4;

/// A numeric measurement column, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    SepalLength,
    SepalWidth,
    PetalLength,
    PetalWidth,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::SepalLength,
        Feature::SepalWidth,
        Feature::PetalLength,
        Feature::PetalWidth,
    ];

    /// Column position inside [`Sample::features`].
    pub fn index(self) -> usize {
        match self {
            Feature::SepalLength => 0,
            Feature::SepalWidth => 1,
            Feature::PetalLength => 2,
            Feature::PetalWidth => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Feature::SepalLength => "Sepal length",
            Feature::SepalWidth => "Sepal width",
            Feature::PetalLength => "Petal length",
            Feature::PetalWidth => "Petal width",
        }
    }

    /// Label with unit, for axis titles.
    pub fn axis_label(self) -> String {
        format!("{} (cm)", self.label())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Sample – one row of the table
// ---------------------------------------------------------------------------

/// A single flower measurement record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Sepal length, sepal width, petal length, petal width (cm).
    pub features: [f64; FEATURE_COUNT],
    pub species: Species,
}

impl Sample {
    pub fn value(&self, feature: Feature) -> f64 {
        self.features[feature.index()]
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The immutable, ordered sample table.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Dataset { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of samples carrying `species`.
    pub fn count_of(&self, species: Species) -> usize {
        self.samples.iter().filter(|s| s.species == species).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_from_str_variants() {
        assert_eq!("setosa".parse::<Species>().unwrap(), Species::Setosa);
        assert_eq!(" Versicolor ".parse::<Species>().unwrap(), Species::Versicolor);
        assert_eq!("Iris-virginica".parse::<Species>().unwrap(), Species::Virginica);
    }

    #[test]
    fn test_species_from_str_unknown() {
        let err = "Daisy".parse::<Species>().unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidSelection(_)));
        assert!(err.to_string().contains("Daisy"));
    }

    #[test]
    fn test_feature_indices_match_all_order() {
        for (i, f) in Feature::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
    }

    #[test]
    fn test_species_order_is_canonical() {
        let mut shuffled = vec![Species::Virginica, Species::Setosa, Species::Versicolor];
        shuffled.sort();
        assert_eq!(shuffled, Species::ALL.to_vec());
    }
}
