use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Outcome;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting from red.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// `#rrggbb` for the web front end.
pub fn css_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

// ---------------------------------------------------------------------------
// Color mapping: outcome → Color32
// ---------------------------------------------------------------------------

/// Distinct colours for the launch outcomes, shared by the pie slices and
/// the scatter markers so both charts use the same legend.
#[derive(Debug, Clone)]
pub struct OutcomeColors {
    mapping: BTreeMap<Outcome, Color32>,
}

impl Default for OutcomeColors {
    fn default() -> Self {
        let mapping = Outcome::ALL
            .into_iter()
            .zip(generate_palette(Outcome::ALL.len()))
            .collect();
        OutcomeColors { mapping }
    }
}

impl OutcomeColors {
    pub fn color_for(&self, outcome: Outcome) -> Color32 {
        self.mapping.get(&outcome).copied().unwrap_or(Color32::GRAY)
    }

    /// Outcome code → `#rrggbb`, embedded in the web page's chart options.
    pub fn css_map(&self) -> BTreeMap<u8, String> {
        self.mapping
            .iter()
            .map(|(o, c)| (o.code(), css_hex(*c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colours() {
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn outcomes_get_different_colours() {
        let colors = OutcomeColors::default();
        assert_ne!(
            colors.color_for(Outcome::Failure),
            colors.color_for(Outcome::Success)
        );
    }

    #[test]
    fn css_hex_formats_lowercase_rgb() {
        assert_eq!(css_hex(Color32::from_rgb(255, 16, 0)), "#ff1000");
        let css = OutcomeColors::default().css_map();
        assert_eq!(css.len(), 2);
        assert!(css.values().all(|c| c.len() == 7 && c.starts_with('#')));
    }
}
