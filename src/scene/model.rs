use crate::{
    assets::decode::RasterImage,
    foundation::core::{Canvas, Vec2},
    layout::geometry::InsertGeometry,
    scene::config::{LayoutRatios, ScaleRange},
};

/// The user-controlled inputs that fully determine a render.
///
/// `scale` and `offset` only mean something once a foreground is set. Mutation goes through
/// the setters so the name length and scale range are always respected.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    background: Option<RasterImage>,
    foreground: Option<RasterImage>,
    name: String,
    scale: f64,
    offset: Vec2,
    scale_range: ScaleRange,
    max_name_chars: usize,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(ScaleRange::default(), 30)
    }
}

impl SceneState {
    /// Empty scene with the given limits.
    pub fn new(scale_range: ScaleRange, max_name_chars: usize) -> Self {
        Self {
            background: None,
            foreground: None,
            name: String::new(),
            scale: scale_range.clamp(1.0),
            offset: Vec2::ZERO,
            scale_range,
            max_name_chars,
        }
    }

    /// Background template, if loaded.
    pub fn background(&self) -> Option<&RasterImage> {
        self.background.as_ref()
    }

    /// Foreground cutout, if loaded.
    pub fn foreground(&self) -> Option<&RasterImage> {
        self.foreground.as_ref()
    }

    /// Name as entered (already truncated).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Foreground scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Foreground top-left in background pixels.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Native size of the output surface, taken from the background.
    pub fn canvas(&self) -> Option<Canvas> {
        self.background.as_ref().map(RasterImage::canvas)
    }

    /// Install the background template.
    pub fn set_background(&mut self, background: RasterImage) {
        self.background = Some(background);
    }

    /// Replace the foreground wholesale and reset placement.
    ///
    /// Scale returns to 1 and the foreground is centred on the insert circle when a background
    /// is present; without one the offset is reset to the origin.
    pub fn set_foreground(&mut self, foreground: RasterImage, ratios: &LayoutRatios) {
        self.scale = self.scale_range.clamp(1.0);
        self.offset = match self.canvas() {
            Some(canvas) => {
                InsertGeometry::for_canvas(canvas, ratios).centered_offset(&foreground, self.scale)
            }
            None => Vec2::ZERO,
        };
        self.foreground = Some(foreground);
    }

    /// Set the name, truncating to the configured number of characters.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.chars().take(self.max_name_chars).collect();
    }

    /// Set the scale, clamped to the configured range. Returns the stored value.
    pub fn set_scale(&mut self, scale: f64) -> f64 {
        self.scale = self.scale_range.clamp(scale);
        self.scale
    }

    /// Move the foreground's top-left corner.
    pub fn set_offset(&mut self, offset: Vec2) {
        if offset.x.is_finite() && offset.y.is_finite() {
            self.offset = offset;
        }
    }

    /// Name with surrounding whitespace removed, or `None` if nothing remains.
    pub fn display_name(&self) -> Option<&str> {
        let trimmed = self.name.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
