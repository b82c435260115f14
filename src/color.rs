use std::collections::BTreeMap;
use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use iris_explorer::data::Species;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Parse `#rrggbb` / `#rgb` into a colour.
pub fn parse_hex(hex: &str) -> Option<Color32> {
    Srgb::<u8>::from_str(hex)
        .ok()
        .map(|c| Color32::from_rgb(c.red, c.green, c.blue))
}

/// Red → yellow → green scale for a correlation in [-1, 1].
/// Undefined cells are gray.
pub fn heatmap_color(r: Option<f64>) -> Color32 {
    match r {
        Some(r) => {
            let t = ((r.clamp(-1.0, 1.0) + 1.0) / 2.0) as f32;
            hsl_to_color32(t * 120.0, 0.7, 0.55)
        }
        None => Color32::GRAY,
    }
}

// ---------------------------------------------------------------------------
// Color mapping: species → Color32
// ---------------------------------------------------------------------------

/// Per-species colours from the configured hex codes, falling back to
/// generated hues for missing or malformed entries.
#[derive(Debug, Clone)]
pub struct SpeciesColors {
    mapping: BTreeMap<Species, Color32>,
}

impl SpeciesColors {
    pub fn new(configured: &BTreeMap<Species, String>) -> Self {
        let fallback = generate_palette(Species::ALL.len());
        let mapping = Species::ALL
            .into_iter()
            .zip(fallback)
            .map(|(sp, default_color)| {
                let color = match configured.get(&sp) {
                    Some(hex) => parse_hex(hex).unwrap_or_else(|| {
                        log::warn!("Invalid colour '{hex}' for {sp}, using a generated one");
                        default_color
                    }),
                    None => default_color,
                };
                (sp, color)
            })
            .collect();
        SpeciesColors { mapping }
    }

    pub fn color_for(&self, species: Species) -> Color32 {
        self.mapping.get(&species).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#e63946"), Some(Color32::from_rgb(0xe6, 0x39, 0x46)));
        assert_eq!(parse_hex("not a colour"), None);
    }

    #[test]
    fn test_species_colors_fallback() {
        let configured = BTreeMap::from([
            (Species::Setosa, "#e63946".to_string()),
            (Species::Versicolor, "oops".to_string()),
        ]);
        let colors = SpeciesColors::new(&configured);
        let generated = generate_palette(3);
        assert_eq!(colors.color_for(Species::Setosa), Color32::from_rgb(0xe6, 0x39, 0x46));
        assert_eq!(colors.color_for(Species::Versicolor), generated[1]);
        assert_eq!(colors.color_for(Species::Virginica), generated[2]);
    }

    #[test]
    fn test_heatmap_extremes() {
        assert_eq!(heatmap_color(None), Color32::GRAY);
        let red = heatmap_color(Some(-1.0));
        let green = heatmap_color(Some(1.0));
        assert!(red.r() > red.g());
        assert!(green.g() > green.r());
    }
}
