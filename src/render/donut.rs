//! Calorie-source donut.
//!
//! Three wedges partition the circle by kcal share. Each wedge gives up a
//! fixed margin at its trailing edge for visual separation; start angles
//! stay contiguous, so the drawn spans sum to 360 minus three margins.

use kurbo::Point;

use crate::foundation::error::{NutrigraphError, NutrigraphResult};
use crate::profile::{MacroView, NutrientProfile};
use crate::render::surface::Surface;
use crate::render::text::TextEngine;
use crate::theme::{Rgba8, Theme};

const NATIVE_SIZE: u16 = 2048;
const RADIUS_FRAC: f64 = 0.4;
/// Fraction of the outer radius cleared to turn the pie into a donut.
const HOLE_RADIUS_FRAC: f64 = 0.7;
/// Angular gap taken off each wedge's trailing edge, degrees.
pub const WEDGE_MARGIN_DEG: f64 = 3.0;

/// Kcalories by source: 9 kcal/g fat, 4 kcal/g net carbs plus 2 kcal/g
/// fiber, 4 kcal/g protein.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalorieSplit {
    pub fat_kcal: f64,
    pub carb_kcal: f64,
    pub protein_kcal: f64,
}

impl CalorieSplit {
    pub fn from_macros(macros: &MacroView) -> Self {
        Self {
            fat_kcal: macros.fat * 9.0,
            carb_kcal: macros.net_carbs * 4.0 + macros.fiber * 2.0,
            protein_kcal: macros.protein * 4.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.fat_kcal + self.carb_kcal + self.protein_kcal
    }

    /// Fat/carb/protein shares of the total, which always sum to one.
    pub fn fractions(&self) -> NutrigraphResult<[f64; 3]> {
        let total = self.total();
        if !total.is_finite() || total <= 0.0 {
            return Err(NutrigraphError::render(format!(
                "calorie total must be positive to partition the donut, got {total}"
            )));
        }
        Ok([
            self.fat_kcal / total,
            self.carb_kcal / total,
            self.protein_kcal / total,
        ])
    }
}

/// Drawn `(start, end)` spans in degrees for the three wedges.
///
/// The margin comes off the end only, clamped so a wedge narrower than the
/// margin collapses instead of inverting; the next wedge still starts at
/// the unmargined boundary.
pub fn wedge_spans(fractions: [f64; 3], margin_deg: f64) -> [(f64, f64); 3] {
    let mut spans = [(0.0, 0.0); 3];
    let mut start = 0.0;
    for (span, fraction) in spans.iter_mut().zip(fractions) {
        let end = start + 360.0 * fraction;
        *span = (start, (end - margin_deg).max(start));
        start = end;
    }
    spans
}

pub fn render(
    profile: &NutrientProfile,
    theme: &Theme,
    text: &mut TextEngine,
) -> NutrigraphResult<vello_cpu::Pixmap> {
    let macros = profile.macros()?;
    let split = CalorieSplit::from_macros(&macros);
    let fractions = split.fractions()?;
    let spans = wedge_spans(fractions, WEDGE_MARGIN_DEG);

    let mut surface = Surface::new(NATIVE_SIZE, NATIVE_SIZE, Rgba8::WHITE);
    let center = surface.center();
    let size = surface.width();
    let radius = size * RADIUS_FRAC;

    let colors = [theme.fat_color, theme.carb_color, theme.protein_color];
    for (&(start, end), color) in spans.iter().zip(colors) {
        surface.fill_wedge(center, radius, start, end, color);
    }
    surface.fill_circle(center, radius * HOLE_RADIUS_FRAC, Rgba8::WHITE);

    surface.draw_centered_text(
        text,
        &format!("{} kcals", split.total().round() as i64),
        Point::new(center.x, size * 0.40),
        theme.font_sizes.display,
        Rgba8::BLACK,
    )?;

    let captions = [
        ("fat", macros.fat, fractions[0], theme.fat_color, 0.50),
        ("carb", macros.carbohydrates, fractions[1], theme.carb_color, 0.55),
        ("protein", macros.protein, fractions[2], theme.protein_color, 0.60),
    ];
    for (name, grams, fraction, color, y_frac) in captions {
        let caption = format!(
            "{}% {} ({}g)",
            (fraction * 100.0).round() as i64,
            name,
            grams.round() as i64
        );
        surface.draw_centered_text(
            text,
            &caption,
            Point::new(center.x, size * y_frac),
            theme.font_sizes.body,
            color,
        )?;
    }

    Ok(surface.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn macros() -> MacroView {
        MacroView {
            fat: 10.0,
            carbohydrates: 20.0,
            protein: 10.0,
            fiber: 4.0,
            sugars: 6.0,
            net_carbs: 16.0,
            saturated_fat: 0.0,
            monounsaturated_fat: 0.0,
            polyunsaturated_fat: 0.0,
        }
    }

    #[test]
    fn kcal_formula_weights_each_source() {
        let split = CalorieSplit::from_macros(&macros());
        assert_eq!(split.fat_kcal, 90.0);
        assert_eq!(split.carb_kcal, 72.0); // 16*4 + 4*2
        assert_eq!(split.protein_kcal, 40.0);
    }

    #[test]
    fn fractions_sum_to_one() {
        let fractions = CalorieSplit::from_macros(&macros()).fractions().unwrap();
        let sum: f64 = fractions.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_total_is_a_render_fault() {
        let split = CalorieSplit {
            fat_kcal: 0.0,
            carb_kcal: 0.0,
            protein_kcal: 0.0,
        };
        assert!(matches!(
            split.fractions(),
            Err(NutrigraphError::Render(_))
        ));
    }

    #[test]
    fn margin_comes_off_trailing_edges_only() {
        let fractions = [0.5, 0.25, 0.25];
        let spans = wedge_spans(fractions, WEDGE_MARGIN_DEG);

        // Start angles stay contiguous at the unmargined boundaries.
        assert_eq!(spans[0].0, 0.0);
        assert_eq!(spans[1].0, 180.0);
        assert_eq!(spans[2].0, 270.0);

        // Each end gives up exactly the margin.
        assert_eq!(spans[0].1, 180.0 - WEDGE_MARGIN_DEG);
        assert_eq!(spans[1].1, 270.0 - WEDGE_MARGIN_DEG);
        assert_eq!(spans[2].1, 360.0 - WEDGE_MARGIN_DEG);

        // Drawn spans sum to 360 minus three margins, not 360.
        let drawn: f64 = spans.iter().map(|(s, e)| e - s).sum();
        assert!((drawn - (360.0 - 3.0 * WEDGE_MARGIN_DEG)).abs() < 1e-9);
    }

    #[test]
    fn wedges_narrower_than_the_margin_collapse_instead_of_inverting() {
        let spans = wedge_spans([0.001, 0.499, 0.5], WEDGE_MARGIN_DEG);
        assert_eq!(spans[0].0, spans[0].1);
        assert!(spans[1].0 > spans[0].1);
    }

    #[test]
    fn round_trip_example_matches_the_expected_shares() {
        // fat=5, carbs=10, protein=5 per 100 g at a 200 g serving.
        let m = MacroView {
            fat: 10.0,
            carbohydrates: 20.0,
            protein: 10.0,
            fiber: 2.0,
            sugars: 0.0,
            net_carbs: 18.0,
            saturated_fat: 0.0,
            monounsaturated_fat: 0.0,
            polyunsaturated_fat: 0.0,
        };
        let split = CalorieSplit::from_macros(&m);
        assert_eq!(split.fat_kcal, 90.0);
        assert_eq!(split.protein_kcal, 40.0);
        assert!(split.carb_kcal >= 72.0 && split.carb_kcal <= 88.0);

        let fractions = split.fractions().unwrap();
        let spans = wedge_spans(fractions, WEDGE_MARGIN_DEG);
        let expected_fat_span = 360.0 * fractions[0] - WEDGE_MARGIN_DEG;
        assert!((spans[0].1 - spans[0].0 - expected_fat_span).abs() < 1e-9);
    }
}
