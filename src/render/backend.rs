use crate::{
    foundation::{
        core::{Point, Rgba8},
        error::{BadgeError, BadgeResult},
        math::unpremultiply_rgba8_in_place,
    },
    layout::text::{FontRole, TextMeasure},
};

/// A finished badge raster.
///
/// Pixels are **premultiplied** RGBA8, matching what the CPU rasterizer produces. Use
/// [`RenderedBadge::to_straight_rgba8`] for encoders that expect straight alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedBadge {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl RenderedBadge {
    /// Premultiplied RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> BadgeResult<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return Err(BadgeError::validation(format!(
                "pixel ({x}, {y}) outside {}x{}",
                self.width, self.height
            )));
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self
            .data
            .get(i..i + 4)
            .ok_or_else(|| BadgeError::render("frame buffer shorter than its dimensions"))?;
        Ok([px[0], px[1], px[2], px[3]])
    }

    /// Copy of the pixels with straight alpha.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }
}

/// Immutable description of how one draw call paints.
///
/// Every draw call receives its own style; nothing is inherited from a previous call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawStyle {
    /// Paint color (straight alpha).
    pub color: Rgba8,
    /// Stroke width; `None` fills.
    pub stroke_width: Option<f64>,
    /// Font role for text draws.
    pub font: Option<FontRole>,
    /// Font size for text draws.
    pub font_size: f32,
}

impl DrawStyle {
    /// Solid fill.
    pub const fn fill(color: Rgba8) -> Self {
        Self {
            color,
            stroke_width: None,
            font: None,
            font_size: 0.0,
        }
    }

    /// Solid stroke of `width` pixels.
    pub const fn stroke(color: Rgba8, width: f64) -> Self {
        Self {
            color,
            stroke_width: Some(width),
            font: None,
            font_size: 0.0,
        }
    }

    /// Text in `font` at `size_px`.
    pub const fn text(color: Rgba8, font: FontRole, size_px: f32) -> Self {
        Self {
            color,
            stroke_width: None,
            font: Some(font),
            font_size: size_px,
        }
    }

    pub(crate) fn paint(&self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.color.r, self.color.g, self.color.b, self.color.a)
    }
}

/// Measures and draws text runs.
///
/// Layout only needs the [`TextMeasure`] half; the compositor then hands every placed run
/// back with a text [`DrawStyle`].
pub trait Typesetter: TextMeasure {
    /// Draw `text` with its baseline-left at `origin`.
    fn draw_run(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        origin: Point,
        style: &DrawStyle,
    ) -> BadgeResult<()>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
