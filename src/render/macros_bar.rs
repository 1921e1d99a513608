//! Proportional stacked macro bar.
//!
//! Eight ordered segments partition the bar top-to-bottom by share of
//! fat + carbohydrates + protein. Segments too short to carry legible text
//! render as a bare color swatch.

use kurbo::{Point, Rect};

use crate::foundation::error::{NutrigraphError, NutrigraphResult};
use crate::profile::{MacroView, NutrientProfile};
use crate::render::surface::Surface;
use crate::render::text::TextEngine;
use crate::theme::{Rgba8, Theme};

const NATIVE_WIDTH: u16 = 1024;
const NATIVE_HEIGHT: u16 = 2048;
const BAR_WIDTH_FRAC: f64 = 0.4;
const BAR_HEIGHT_FRAC: f64 = 0.9;
/// Minimum segment height that still gets labels, at the 2048 native scale.
const MIN_LABEL_HEIGHT_PX: f64 = 32.0;
const LABEL_PAD_PX: f64 = 16.0;

/// Segment names, position-keyed like the palette.
pub const SEGMENT_LABELS: [&str; 8] = [
    "Sat. fat",
    "Poly. fat",
    "Mono. fat",
    "Other fats",
    "Fiber",
    "Sugars",
    "Other carbs",
    "Protein",
];

/// The eight partitioned quantities in grams, in draw order.
pub fn segment_values(macros: &MacroView) -> [f64; 8] {
    let other_fats = macros.fat
        - macros.saturated_fat
        - macros.polyunsaturated_fat
        - macros.monounsaturated_fat;
    let other_carbs = macros.carbohydrates - macros.fiber - macros.sugars;

    [
        macros.saturated_fat,
        macros.polyunsaturated_fat,
        macros.monounsaturated_fat,
        other_fats,
        macros.fiber,
        macros.sugars,
        other_carbs,
        macros.protein,
    ]
}

/// Pixel heights proportional to each value's share of `total`, clamped to
/// zero so noisy subcomponent sums cannot produce inverted rectangles.
pub fn segment_heights(values: &[f64; 8], total: f64, bar_height: f64) -> [f64; 8] {
    values.map(|value| (value / total * bar_height).max(0.0))
}

pub fn render(
    profile: &NutrientProfile,
    theme: &Theme,
    text: &mut TextEngine,
) -> NutrigraphResult<vello_cpu::Pixmap> {
    let macros = profile.macros()?;
    let total = macros.total();
    if !total.is_finite() || total <= 0.0 {
        return Err(NutrigraphError::render(format!(
            "macro total must be positive to partition the bar, got {total} for FDC ID {}",
            profile.identifier
        )));
    }

    let mut surface = Surface::new(NATIVE_WIDTH, NATIVE_HEIGHT, Rgba8::WHITE);
    let width = surface.width();
    let height = surface.height();

    let bar_width = width * BAR_WIDTH_FRAC;
    let bar_height = height * BAR_HEIGHT_FRAC;
    let x1 = width / 2.0 - bar_width / 2.0;
    let x2 = width / 2.0 + bar_width / 2.0;
    let min_label_height = MIN_LABEL_HEIGHT_PX * height / 2048.0;

    let values = segment_values(&macros);
    let heights = segment_heights(&values, total, bar_height);
    let size = theme.font_sizes.small;

    let mut y = height / 2.0 - bar_height / 2.0;
    for i in 0..values.len() {
        let color = theme.macro_colors[i];
        let h = heights[i];
        surface.fill_rect(Rect::new(x1, y, x2, y + h), color);

        if h >= min_label_height {
            let (label_w, label_h) = text.measure(SEGMENT_LABELS[i], size)?;
            surface.draw_text_top_left(
                text,
                SEGMENT_LABELS[i],
                Point::new(x1 - LABEL_PAD_PX - label_w, y + h / 2.0 - label_h / 2.0),
                size,
                color,
            )?;

            let weight = format!("{:.1}g", values[i]);
            surface.draw_centered_text(
                text,
                &weight,
                Point::new(width / 2.0, y + h / 2.0),
                size,
                Rgba8::WHITE,
            )?;
        }

        y += h;
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
            saturated_fat: 3.0,
            monounsaturated_fat: 2.0,
            polyunsaturated_fat: 1.0,
        }
    }

    #[test]
    fn segments_partition_fat_and_carbs_into_remainders() {
        let values = segment_values(&macros());
        // other fats = 10 - 3 - 1 - 2, other carbs = 20 - 4 - 6.
        assert_eq!(values[3], 4.0);
        assert_eq!(values[6], 10.0);
        // Fat and carb groups sum back to their totals.
        assert!((values[0] + values[1] + values[2] + values[3] - 10.0).abs() < 1e-9);
        assert!((values[4] + values[5] + values[6] - 20.0).abs() < 1e-9);
    }

    #[test]
    fn heights_are_proportional_to_shares() {
        let m = macros();
        let values = segment_values(&m);
        let heights = segment_heights(&values, m.total(), 2000.0);

        // Protein is a quarter of the 40 g total.
        assert!((heights[7] - 500.0).abs() < 1e-9);
        // Heights sum to the full bar when no value is negative.
        let sum: f64 = heights.iter().sum();
        assert!((sum - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn negative_remainders_clamp_to_zero_height() {
        let mut m = macros();
        m.saturated_fat = 50.0; // inconsistent source: subcomponent > total fat
        let values = segment_values(&m);
        assert!(values[3] < 0.0);
        let heights = segment_heights(&values, m.total(), 2000.0);
        assert_eq!(heights[3], 0.0);
    }
}
