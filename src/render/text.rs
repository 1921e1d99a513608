//! Parley-backed text shaping and measurement.
//!
//! One font file at one weight serves the whole infographic; size and color
//! vary per call. Layouts are measured before placement so captions can be
//! anchored on their bounding-box center.

use crate::foundation::error::{NutrigraphError, NutrigraphResult};
use crate::theme::Rgba8;

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(color: Rgba8) -> Self {
        Self {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

/// Stateful helper owning the Parley contexts and the one loaded font.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl TextEngine {
    /// Register the font bytes and keep both the Parley family and the
    /// renderer-side font data.
    pub fn new(font_bytes: Vec<u8>) -> NutrigraphResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            NutrigraphError::render("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| NutrigraphError::render("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    pub fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape and lay out plain text. With `max_width_px` the text is
    /// word-wrapped to that width; multi-line output is center-aligned.
    pub fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
        max_width_px: Option<f32>,
    ) -> NutrigraphResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(NutrigraphError::render("text size_px must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(max_width_px);
        layout.align(
            max_width_px,
            parley::Alignment::Center,
            parley::AlignmentOptions::default(),
        );

        Ok(layout)
    }

    /// Bounding-box size of `text` at `size_px`, in pixels.
    pub fn measure(&mut self, text: &str, size_px: f32) -> NutrigraphResult<(f64, f64)> {
        let layout = self.layout(text, size_px, TextBrushRgba8::default(), None)?;
        Ok((f64::from(layout.width()), f64::from(layout.height())))
    }
}
