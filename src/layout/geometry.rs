use crate::{
    assets::decode::RasterImage,
    foundation::core::{Canvas, Circle, Point, Rect, Vec2},
    scene::config::LayoutRatios,
};

/// Circular insert region derived from the background's native size.
///
/// Never stored: every render recomputes it, so it always tracks the current background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InsertGeometry {
    /// Circle centre.
    pub center: Point,
    /// Circle radius.
    pub radius: f64,
    /// Target height of the foreground at scale 1.
    pub base_height: f64,
}

impl InsertGeometry {
    /// Geometry for a background of `canvas` size.
    pub fn for_canvas(canvas: Canvas, ratios: &LayoutRatios) -> Self {
        let radius = canvas.h() / ratios.circle_radius_divisor;
        Self {
            center: Point::new(canvas.w() / 2.0, canvas.h() * ratios.circle_center_y),
            radius,
            base_height: 2.0 * radius * ratios.foreground_fill,
        }
    }

    /// Circle diameter.
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    /// The clip shape.
    pub fn circle(&self) -> Circle {
        Circle::new(self.center, self.radius)
    }

    /// Foreground draw size at `scale`: height is `base_height * scale`, width keeps the
    /// foreground's aspect ratio.
    pub fn foreground_size(&self, foreground: &RasterImage, scale: f64) -> Vec2 {
        let height = self.base_height * scale;
        Vec2::new(foreground.aspect_ratio() * height, height)
    }

    /// Foreground draw rectangle with its top-left corner at `offset`.
    pub fn foreground_rect(&self, foreground: &RasterImage, scale: f64, offset: Vec2) -> Rect {
        let size = self.foreground_size(foreground, scale);
        Rect::new(offset.x, offset.y, offset.x + size.x, offset.y + size.y)
    }

    /// Offset that centres the foreground on the circle at `scale`.
    pub fn centered_offset(&self, foreground: &RasterImage, scale: f64) -> Vec2 {
        let size = self.foreground_size(foreground, scale);
        Vec2::new(
            self.center.x - size.x / 2.0,
            self.center.y - size.y / 2.0,
        )
    }
}

/// Decorative frame stroked along the surface edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    /// Stroke width.
    pub stroke_width: f64,
    /// Stroke centre line; inset by half the stroke so the outer edge meets the surface edge.
    pub rect: Rect,
}

impl FrameGeometry {
    /// Frame for `canvas`.
    pub fn for_canvas(canvas: Canvas, ratios: &LayoutRatios) -> Self {
        let w = canvas.w() * ratios.frame_width;
        Self {
            stroke_width: w,
            rect: Rect::new(w / 2.0, w / 2.0, canvas.w() - w / 2.0, canvas.h() - w / 2.0),
        }
    }
}

/// Where the sentence is set on `canvas`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextAnchor {
    /// Horizontal centre of every line.
    pub center_x: f64,
    /// Baseline of the first line.
    pub top_y: f64,
    /// Maximum line width.
    pub max_width: f64,
    /// Font size.
    pub font_size: f32,
}

impl TextAnchor {
    /// Anchor for `canvas`.
    pub fn for_canvas(canvas: Canvas, ratios: &LayoutRatios) -> Self {
        let margin = canvas.w() * ratios.text_margin;
        Self {
            center_x: canvas.w() / 2.0,
            top_y: canvas.h() * ratios.text_top,
            max_width: canvas.w() - margin * 2.0,
            font_size: (canvas.w() * ratios.font_size) as f32,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
