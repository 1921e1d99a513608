//! Composite assembly: one canvas holding every panel plus captions.
//!
//! The macro bar keeps its native size on the left; the wheels, donut and
//! stats grid are pasted at half scale, bottom-anchored in the right
//! region. The finished canvas is downscaled 4x before encoding.

use kurbo::Point;

use crate::drv;
use crate::foundation::error::{NutrigraphError, NutrigraphResult};
use crate::profile::NutrientProfile;
use crate::render::surface::Surface;
use crate::render::text::TextEngine;
use crate::render::{donut, macros_bar, stats, wheel};
use crate::theme::{Rgba8, Theme};

const CANVAS_WIDTH: u16 = 2816;
const CANVAS_HEIGHT: u16 = 2048;
/// Left edge of the wheel/donut/stats region; the macro bar's own canvas
/// is wider than this but its painted bar is not.
const RIGHT_REGION_X: f64 = 768.0;
const PANEL_SCALE: f64 = 0.5;
const DOWNSCALE_FACTOR: u32 = 4;
const TITLE_CAPTION: &str = "Nutritional contents of";
const TITLE_Y_FRAC: f64 = 0.07;
const DESCRIPTION_Y_FRAC: f64 = 0.2;

/// Renders complete infographics for derived profiles.
///
/// Owns the text engine (and with it the loaded font), so one renderer
/// serves a whole batch.
pub struct Renderer {
    theme: Theme,
    text: TextEngine,
}

impl Renderer {
    pub fn new(theme: Theme, font_bytes: Vec<u8>) -> NutrigraphResult<Self> {
        Ok(Self {
            theme,
            text: TextEngine::new(font_bytes)?,
        })
    }

    /// Render the full composite for one profile, already downscaled for
    /// encoding.
    pub fn render_profile(
        &mut self,
        profile: &NutrientProfile,
    ) -> NutrigraphResult<image::RgbaImage> {
        let theme = self.theme.clone();
        let text = &mut self.text;

        let bar = macros_bar::render(profile, &theme, text)?;
        let donut = donut::render(profile, &theme, text)?;
        let vitamins = wheel::render(
            &drv::vitamin_entries(profile),
            theme.vitamin_accent,
            &theme,
            text,
        )?;
        let minerals = wheel::render(
            &drv::mineral_entries(profile),
            theme.mineral_accent,
            &theme,
            text,
        )?;
        let stats = stats::render(profile, &theme, text)?;

        let mut canvas = Surface::new(CANVAS_WIDTH, CANVAS_HEIGHT, Rgba8::WHITE);
        let height = canvas.height();
        let width = canvas.width();

        let wheel_half = f64::from(minerals.width()) * PANEL_SCALE;
        let donut_half = f64::from(donut.height()) * PANEL_SCALE;
        let stats_half_w = f64::from(stats.width()) * PANEL_SCALE;
        let stats_half_h = f64::from(stats.height()) * PANEL_SCALE;

        canvas.draw_pixmap_scaled(bar, Point::new(0.0, 0.0), 1.0);
        canvas.draw_pixmap_scaled(
            minerals,
            Point::new(RIGHT_REGION_X, height - wheel_half),
            PANEL_SCALE,
        );
        canvas.draw_pixmap_scaled(
            vitamins,
            Point::new(RIGHT_REGION_X + wheel_half, height - wheel_half),
            PANEL_SCALE,
        );
        canvas.draw_pixmap_scaled(
            donut,
            Point::new(RIGHT_REGION_X + wheel_half, height - wheel_half - donut_half),
            PANEL_SCALE,
        );
        canvas.draw_pixmap_scaled(
            stats,
            Point::new(
                RIGHT_REGION_X + wheel_half / 2.0 - stats_half_w / 2.0,
                height - wheel_half - stats_half_h,
            ),
            PANEL_SCALE,
        );

        let caption_x = RIGHT_REGION_X + wheel_half / 2.0;
        canvas.draw_centered_text(
            text,
            TITLE_CAPTION,
            Point::new(caption_x, height * TITLE_Y_FRAC),
            theme.font_sizes.body,
            Rgba8::BLACK,
        )?;

        // Serving description, word-wrapped to the wheel column width.
        let description = text.layout(
            &profile.description,
            theme.font_sizes.heading,
            Rgba8::BLACK.into(),
            Some(wheel_half as f32),
        )?;
        let description_origin = Point::new(
            caption_x - wheel_half / 2.0,
            height * DESCRIPTION_Y_FRAC - f64::from(description.height()) / 2.0,
        );
        canvas.draw_layout(text.font().clone(), &description, description_origin);

        let tag = format!("FDC ID {}", profile.identifier);
        let (tag_w, tag_h) = text.measure(&tag, theme.font_sizes.small)?;
        canvas.draw_text_top_left(
            text,
            &tag,
            Point::new(width - tag_w - 1.0, height - tag_h - 1.0),
            theme.font_sizes.small,
            Rgba8::GREY,
        )?;

        let full = pixmap_into_image(canvas.finish())?;
        Ok(image::imageops::resize(
            &full,
            u32::from(CANVAS_WIDTH) / DOWNSCALE_FACTOR,
            u32::from(CANVAS_HEIGHT) / DOWNSCALE_FACTOR,
            image::imageops::FilterType::Lanczos3,
        ))
    }
}

/// Convert an opaque rendered pixmap into an image buffer. Every surface is
/// painted on an opaque background, so premultiplied and straight alpha
/// coincide here.
fn pixmap_into_image(pixmap: vello_cpu::Pixmap) -> NutrigraphResult<image::RgbaImage> {
    let (width, height) = (u32::from(pixmap.width()), u32::from(pixmap.height()));
    image::RgbaImage::from_raw(width, height, pixmap.data_as_u8_slice().to_vec())
        .ok_or_else(|| NutrigraphError::render("rendered pixel buffer has the wrong length"))
}
