use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::analysis::Selection;
use crate::data::{Feature, Species};

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "IRIS_EXPLORER_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// User-tunable defaults. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub theme: Theme,
    pub histogram_bins: usize,
    /// Whisker reach in IQR multiples.
    pub whisker_range: f64,
    pub scatter_x: Feature,
    pub scatter_y: Feature,
    pub default_selection: Vec<Species>,
    /// Species → `#rrggbb`.
    pub colors: BTreeMap<Species, String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            histogram_bins: 15,
            whisker_range: 1.5,
            scatter_x: Feature::PetalLength,
            scatter_y: Feature::PetalWidth,
            default_selection: Species::ALL.to_vec(),
            colors: BTreeMap::from([
                (Species::Setosa, "#e63946".to_string()),
                (Species::Versicolor, "#2a9d8f".to_string()),
                (Species::Virginica, "#e9c46a".to_string()),
            ]),
        }
    }
}

impl DashboardConfig {
    /// Load from `$IRIS_EXPLORER_CONFIG` if set, else defaults.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let config = Self::from_file(Path::new(&path))?;
                log::info!("Using configuration from {}", Path::new(&path).display());
                Ok(config)
            }
            None => {
                log::info!("{CONFIG_ENV} not set, using default configuration");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("loading config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("parsing config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.histogram_bins == 0 {
            bail!("histogram_bins must be at least 1");
        }
        if !(self.whisker_range.is_finite() && self.whisker_range > 0.0) {
            bail!("whisker_range must be a positive number, got {}", self.whisker_range);
        }
        if self.default_selection.is_empty() {
            bail!("default_selection must name at least one species");
        }
        Ok(())
    }

    pub fn initial_selection(&self) -> Selection {
        self.default_selection.iter().copied().collect()
    }
}
