//! Misc stats grid: a fixed 5x2 table of label/value cells.
//!
//! Cell dimensions are derived from measuring the widest expected value
//! text, so the grid never clips regardless of how wide the numbers get.

use kurbo::{Point, Rect};

use crate::drv::{DRV_OMEGA_3, DRV_OMEGA_6};
use crate::foundation::error::NutrigraphResult;
use crate::profile::{Nutrient, NutrientProfile};
use crate::render::surface::Surface;
use crate::render::text::TextEngine;
use crate::theme::{Rgba8, Theme};

/// Widest value the grid is expected to hold; cells are sized to fit it.
pub const WIDEST_VALUE_TEMPLATE: &str = "100% (1000mg)";

const CELL_SCALE: f64 = 1.1;
const CELL_MARGIN_PX: f64 = 32.0;
const TEXT_INSET_PX: f64 = 32.0;

/// The five label/value rows, unmeasured quantities shown as `N/A`.
pub fn rows(profile: &NutrientProfile) -> [(&'static str, String); 5] {
    fn drv_share(nutrient: Nutrient, drv: f64) -> String {
        match nutrient.value() {
            Some(mg) => format!(
                "{}% ({}mg)",
                (mg / drv * 100.0).round() as i64,
                mg.round() as i64
            ),
            None => "N/A".to_owned(),
        }
    }

    fn grams(nutrient: Nutrient) -> String {
        match nutrient.value() {
            Some(g) => format!("{g:.1}g"),
            None => "N/A".to_owned(),
        }
    }

    let water = match profile.water.value() {
        Some(g) => format!("{}ml", g.round() as i64),
        None => "N/A".to_owned(),
    };

    [
        ("Omega-3", drv_share(profile.omega_3, DRV_OMEGA_3)),
        ("Omega-6", drv_share(profile.omega_6, DRV_OMEGA_6)),
        ("Water", water),
        ("Trans fats", grams(profile.trans_fat)),
        ("Net carbs", grams(profile.net_carbs)),
    ]
}

pub fn render(
    profile: &NutrientProfile,
    theme: &Theme,
    text: &mut TextEngine,
) -> NutrigraphResult<vello_cpu::Pixmap> {
    let rows = rows(profile);
    let size = theme.font_sizes.body;

    let (template_w, template_h) = text.measure(WIDEST_VALUE_TEMPLATE, size)?;
    let cell_w = template_w * CELL_SCALE;
    let cell_h = template_h * CELL_SCALE;
    let table_w = cell_w * 2.0 + CELL_MARGIN_PX;
    let table_h = cell_h * 5.0 + CELL_MARGIN_PX * 4.0;

    let mut surface = Surface::new(table_w.ceil() as u16, table_h.ceil() as u16, Rgba8::WHITE);

    for (i, (label, value)) in rows.iter().enumerate() {
        let y1 = i as f64 * (cell_h + CELL_MARGIN_PX);
        let y2 = y1 + cell_h;

        surface.fill_rect(Rect::new(0.0, y1, cell_w, y2), theme.stats_accent);
        surface.draw_text_top_left(
            text,
            label,
            Point::new(TEXT_INSET_PX, y1),
            size,
            Rgba8::WHITE,
        )?;

        let value_x = cell_w + CELL_MARGIN_PX;
        surface.fill_rect(Rect::new(value_x, y1, table_w, y2), theme.stats_accent);
        surface.draw_text_top_left(
            text,
            value,
            Point::new(value_x + TEXT_INSET_PX, y1),
            size,
            Rgba8::WHITE,
        )?;
    }

    Ok(surface.finish())
}

// Row formatting is exercised against derived profiles in
// tests/derivation.rs, where a full NutrientProfile is cheap to build.
