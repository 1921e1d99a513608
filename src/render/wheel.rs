//! Radial DRV-percentage wheel, shared by the vitamin and mineral panels.
//!
//! The filled outer disk is the 100%-of-DRV boundary; a white ring at half
//! radius marks 50%. Each entry gets a spoke: a thin guide to the rim, a
//! label with the true percentage (or N/A), and, when measured, a thick
//! fill whose length clamps at the boundary even past 100%.

use crate::drv::WheelEntry;
use crate::foundation::error::{NutrigraphError, NutrigraphResult};
use crate::render::surface::{Surface, polar_point};
use crate::render::text::TextEngine;
use crate::theme::{Rgba8, Theme};

const NATIVE_SIZE: u16 = 2048;
const OUTER_RADIUS_FRAC: f64 = 0.35;
/// Labels sit this factor past the rim along the spoke.
const LABEL_DISTANCE_FACTOR: f64 = 1.2;
const GUIDE_LINE_WIDTH: f64 = 5.0;
const FILL_LINE_WIDTH: f64 = 40.0;
const RING_LINE_WIDTH: f64 = 5.0;

/// Angle of spoke `index` out of `count`, radians from the x-axis.
pub fn spoke_angle(index: usize, count: usize) -> f64 {
    index as f64 * std::f64::consts::TAU / count as f64
}

/// Drawn fill length: the true ratio clamped into the disk.
pub fn fill_length(ratio: f64, outer_radius: f64) -> f64 {
    ratio.clamp(0.0, 1.0) * outer_radius
}

/// Label percentage, unclamped; `N/A` for unmeasured entries.
pub fn percent_label(ratio: Option<f64>) -> String {
    match ratio {
        Some(ratio) => format!("{}%", (ratio * 100.0).round() as i64),
        None => "N/A".to_owned(),
    }
}

pub fn render(
    entries: &[WheelEntry],
    accent: Rgba8,
    theme: &Theme,
    text: &mut TextEngine,
) -> NutrigraphResult<vello_cpu::Pixmap> {
    if entries.is_empty() {
        return Err(NutrigraphError::render(
            "wheel requires at least one entry",
        ));
    }

    let mut surface = Surface::new(NATIVE_SIZE, NATIVE_SIZE, Rgba8::WHITE);
    let center = surface.center();
    let outer_radius = surface.width() * OUTER_RADIUS_FRAC;

    surface.fill_circle(center, outer_radius, accent);
    // 50% marker: a white ring built from two layered disks.
    surface.fill_circle(center, outer_radius / 2.0 + RING_LINE_WIDTH / 2.0, Rgba8::WHITE);
    surface.fill_circle(center, outer_radius / 2.0 - RING_LINE_WIDTH / 2.0, accent);

    for (i, entry) in entries.iter().enumerate() {
        let angle = spoke_angle(i, entries.len());
        let rim = polar_point(center, outer_radius, angle);
        surface.fill_line(center, rim, GUIDE_LINE_WIDTH, Rgba8::WHITE);

        let label_at = polar_point(center, outer_radius * LABEL_DISTANCE_FACTOR, angle);
        let label = format!("{}\n({})", entry.label, percent_label(entry.ratio));
        surface.draw_centered_text(text, &label, label_at, theme.font_sizes.body, Rgba8::BLACK)?;

        if let Some(ratio) = entry.ratio {
            let tip = polar_point(center, fill_length(ratio, outer_radius), angle);
            surface.fill_line(center, tip, FILL_LINE_WIDTH, Rgba8::WHITE);
        }
    }

    Ok(surface.finish())
}
