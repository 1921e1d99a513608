//! Shared drawing primitives over a CPU render context.
//!
//! Everything is drawn with fills: thick radial lines are filled quads,
//! rings are layered disks, wedges are arc-bounded paths. The primitives
//! carry no nutrient-domain knowledge; every panel renderer builds on them.

use std::sync::Arc as StdArc;

use kurbo::{Affine, Arc, BezPath, Circle, Point, Rect, Shape as _, Vec2};

use crate::render::text::{TextBrushRgba8, TextEngine};
use crate::foundation::error::NutrigraphResult;
use crate::theme::Rgba8;

/// Flattening tolerance for circles and arcs, in device pixels.
const CURVE_TOLERANCE: f64 = 0.1;

/// One panel canvas plus its pending draw commands.
pub struct Surface {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl Surface {
    pub fn new(width: u16, height: u16, background: Rgba8) -> Self {
        let ctx = vello_cpu::RenderContext::new(width, height);
        let mut surface = Self { ctx, width, height };
        surface.fill_rect(
            Rect::new(0.0, 0.0, f64::from(width), f64::from(height)),
            background,
        );
        surface
    }

    pub fn width(&self) -> f64 {
        f64::from(self.width)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width() / 2.0, self.height() / 2.0)
    }

    fn begin(&mut self, transform: Affine) {
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.begin(Affine::IDENTITY);
        self.ctx.set_paint(solid(color));
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1));
    }

    pub fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        self.begin(Affine::IDENTITY);
        self.ctx.set_paint(solid(color));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        self.fill_path(&Circle::new(center, radius).to_path(CURVE_TOLERANCE), color);
    }

    /// Pie wedge from `start_deg` to `end_deg` (degrees, clockwise on the
    /// y-down raster). Degenerate spans draw nothing.
    pub fn fill_wedge(
        &mut self,
        center: Point,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
        color: Rgba8,
    ) {
        let path = wedge_path(center, radius, start_deg, end_deg);
        if !path.is_empty() {
            self.fill_path(&path, color);
        }
    }

    /// Straight segment of the given width, rendered as a filled quad.
    pub fn fill_line(&mut self, p0: Point, p1: Point, width: f64, color: Rgba8) {
        let path = line_quad(p0, p1, width);
        if !path.is_empty() {
            self.fill_path(&path, color);
        }
    }

    /// Lay out `text` and draw it so its bounding box is centered on
    /// `center`. Multi-line strings are center-aligned per line.
    pub fn draw_centered_text(
        &mut self,
        engine: &mut TextEngine,
        text: &str,
        center: Point,
        size_px: f32,
        color: Rgba8,
    ) -> NutrigraphResult<()> {
        let layout = engine.layout(text, size_px, color.into(), None)?;
        let origin = Point::new(
            center.x - f64::from(layout.width()) / 2.0,
            center.y - f64::from(layout.height()) / 2.0,
        );
        self.draw_layout(engine.font().clone(), &layout, origin);
        Ok(())
    }

    /// Draw `text` with its bounding box's top-left corner at `origin`.
    pub fn draw_text_top_left(
        &mut self,
        engine: &mut TextEngine,
        text: &str,
        origin: Point,
        size_px: f32,
        color: Rgba8,
    ) -> NutrigraphResult<()> {
        let layout = engine.layout(text, size_px, color.into(), None)?;
        self.draw_layout(engine.font().clone(), &layout, origin);
        Ok(())
    }

    /// Draw a prepared layout with its top-left corner at `origin`.
    pub fn draw_layout(
        &mut self,
        font: vello_cpu::peniko::FontData,
        layout: &parley::Layout<TextBrushRgba8>,
        origin: Point,
    ) {
        self.begin(Affine::translate(origin.to_vec2()));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Paste another panel's pixels at `origin`, uniformly scaled.
    pub fn draw_pixmap_scaled(&mut self, pixmap: vello_cpu::Pixmap, origin: Point, scale: f64) {
        let (w, h) = (f64::from(pixmap.width()), f64::from(pixmap.height()));
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(StdArc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        self.begin(Affine::translate(origin.to_vec2()) * Affine::scale(scale));
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
    }

    /// Flush all commands and rasterize into a pixmap.
    pub fn finish(mut self) -> vello_cpu::Pixmap {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap
    }
}

/// Point on the circle of `radius` around `center` at `angle_rad`.
pub fn polar_point(center: Point, radius: f64, angle_rad: f64) -> Point {
    center + Vec2::new(angle_rad.cos(), angle_rad.sin()) * radius
}

/// Closed pie-wedge path; empty when the span is degenerate.
pub fn wedge_path(center: Point, radius: f64, start_deg: f64, end_deg: f64) -> BezPath {
    if !(end_deg > start_deg) || radius <= 0.0 {
        return BezPath::new();
    }

    let start_rad = start_deg.to_radians();
    let sweep_rad = (end_deg - start_deg).to_radians();

    let mut path = BezPath::new();
    path.move_to(center);
    path.line_to(polar_point(center, radius, start_rad));
    let arc = Arc {
        center,
        radii: Vec2::new(radius, radius),
        start_angle: start_rad,
        sweep_angle: sweep_rad,
        x_rotation: 0.0,
    };
    for el in arc.append_iter(CURVE_TOLERANCE) {
        path.push(el);
    }
    path.close_path();
    path
}

/// Quad covering a straight segment of the given width; empty when the
/// segment or the width is degenerate.
pub fn line_quad(p0: Point, p1: Point, width: f64) -> BezPath {
    let dir = p1 - p0;
    let length = dir.hypot();
    if length <= f64::EPSILON || width <= 0.0 {
        return BezPath::new();
    }

    let normal = Vec2::new(-dir.y, dir.x) * (width / 2.0 / length);
    let mut path = BezPath::new();
    path.move_to(p0 + normal);
    path.line_to(p1 + normal);
    path.line_to(p1 - normal);
    path.line_to(p0 - normal);
    path.close_path();
    path
}

fn solid(color: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polar_point_walks_the_unit_circle() {
        let c = Point::new(10.0, 10.0);
        let p = polar_point(c, 5.0, 0.0);
        assert!((p.x - 15.0).abs() < 1e-9 && (p.y - 10.0).abs() < 1e-9);

        let p = polar_point(c, 5.0, std::f64::consts::FRAC_PI_2);
        assert!((p.x - 10.0).abs() < 1e-9 && (p.y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn wedge_path_is_empty_for_degenerate_spans() {
        let c = Point::new(0.0, 0.0);
        assert!(wedge_path(c, 10.0, 90.0, 90.0).is_empty());
        assert!(wedge_path(c, 10.0, 90.0, 45.0).is_empty());
        assert!(wedge_path(c, 0.0, 0.0, 90.0).is_empty());
    }

    #[test]
    fn wedge_path_starts_at_center_and_closes() {
        let c = Point::new(100.0, 100.0);
        let path = wedge_path(c, 50.0, 0.0, 90.0);
        let elements = path.elements();
        assert!(matches!(elements[0], kurbo::PathEl::MoveTo(p) if p == c));
        assert!(matches!(elements.last(), Some(kurbo::PathEl::ClosePath)));
        // First boundary point sits on the circle at angle 0.
        assert!(matches!(
            elements[1],
            kurbo::PathEl::LineTo(p) if (p.x - 150.0).abs() < 1e-9 && (p.y - 100.0).abs() < 1e-9
        ));
    }

    #[test]
    fn line_quad_has_the_requested_width() {
        let path = line_quad(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 4.0);
        let elements = path.elements();
        // Horizontal segment: corners offset by half the width vertically.
        assert!(matches!(elements[0], kurbo::PathEl::MoveTo(p) if (p.y - 2.0).abs() < 1e-9));
        assert!(matches!(elements[3], kurbo::PathEl::LineTo(p) if (p.y + 2.0).abs() < 1e-9));
    }

    #[test]
    fn line_quad_is_empty_for_zero_length_segments() {
        let p = Point::new(3.0, 4.0);
        assert!(line_quad(p, p, 40.0).is_empty());
    }
}
