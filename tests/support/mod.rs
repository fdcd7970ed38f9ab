#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use badgeforge::{
    BadgeResult, DrawStyle, FontRole, Point, RasterImage, TextMeasure, Typesetter,
};

/// Every glyph advances by this fraction of the font size.
pub const ADVANCE_EM: f64 = 0.45;

/// Block height above the baseline, as a fraction of the font size.
pub const ASCENT_EM: f64 = 0.7;

#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub text: String,
    pub font: FontRole,
    pub origin: Point,
}

/// Fixed-advance typesetter that paints each run as a solid block sitting on its baseline.
#[derive(Clone, Default)]
pub struct BlockType {
    pub calls: Rc<RefCell<Vec<DrawCall>>>,
}

impl BlockType {
    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.borrow().clone()
    }
}

impl TextMeasure for BlockType {
    fn advance(&mut self, text: &str, _font: FontRole, size_px: f32) -> BadgeResult<f64> {
        Ok(text.chars().count() as f64 * ADVANCE_EM * f64::from(size_px))
    }
}

impl Typesetter for BlockType {
    fn draw_run(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        origin: Point,
        style: &DrawStyle,
    ) -> BadgeResult<()> {
        let font = style.font.unwrap_or(FontRole::Primary);
        self.calls.borrow_mut().push(DrawCall {
            text: text.to_string(),
            font,
            origin,
        });

        let width = self.advance(text, font, style.font_size)?;
        let ascent = ASCENT_EM * f64::from(style.font_size);
        let c = style.color;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            origin.x,
            origin.y - ascent,
            origin.x + width,
            origin.y,
        ));
        Ok(())
    }
}

pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RasterImage {
    RasterImage::from_straight_rgba8(width, height, rgba.repeat((width * height) as usize))
        .unwrap()
}

pub fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}
