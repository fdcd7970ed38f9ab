use std::{borrow::Cow, path::Path};

use anyhow::Context;

use crate::{
    foundation::{
        core::Point,
        error::{BadgeError, BadgeResult},
    },
    layout::text::{FontRole, TextMeasure},
    render::backend::{DrawStyle, Typesetter},
    scene::config::FontConfig,
};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

struct LoadedFace {
    family: String,
    data: vello_cpu::peniko::FontData,
}

/// The two fonts a badge is set in, shaped with Parley and drawn as `vello_cpu` glyph runs.
///
/// Fonts are registered from bytes up front, so a `FontBook` that was built successfully can
/// always render; there is no lazy loading during a draw.
pub struct FontBook {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    primary: LoadedFace,
    fallback: LoadedFace,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("primary", &self.primary.family)
            .field("fallback", &self.fallback.family)
            .finish()
    }
}

impl FontBook {
    /// Read both font files named by `cfg`.
    pub fn load(cfg: &FontConfig) -> BadgeResult<Self> {
        let primary = read_font(&cfg.primary)?;
        let fallback = read_font(&cfg.fallback)?;
        Self::from_bytes(primary, fallback)
    }

    /// Register primary and fallback font bytes (OTF/TTF).
    pub fn from_bytes(primary: Vec<u8>, fallback: Vec<u8>) -> BadgeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let primary = register(&mut font_ctx, primary)?;
        let fallback = register(&mut font_ctx, fallback)?;
        tracing::debug!(
            primary = %primary.family,
            fallback = %fallback.family,
            "fonts registered"
        );
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            primary,
            fallback,
        })
    }

    /// Family name detected for `role`.
    pub fn family_name(&self, role: FontRole) -> &str {
        &self.face(role).family
    }

    fn face(&self, role: FontRole) -> &LoadedFace {
        match role {
            FontRole::Primary => &self.primary,
            FontRole::Fallback => &self.fallback,
        }
    }

    fn shape(
        &mut self,
        text: &str,
        role: FontRole,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> BadgeResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(BadgeError::layout("font size must be finite and > 0"));
        }
        let family = match role {
            FontRole::Primary => self.primary.family.clone(),
            FontRole::Fallback => self.fallback.family.clone(),
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl TextMeasure for FontBook {
    fn advance(&mut self, text: &str, font: FontRole, size_px: f32) -> BadgeResult<f64> {
        let layout = self.shape(text, font, size_px, TextBrushRgba8::default())?;
        let mut advance = 0.0f64;
        for line in layout.lines() {
            for item in line.items() {
                if let parley::layout::PositionedLayoutItem::GlyphRun(run) = item {
                    advance += f64::from(run.advance());
                }
            }
        }
        Ok(advance)
    }
}

impl Typesetter for FontBook {
    fn draw_run(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        origin: Point,
        style: &DrawStyle,
    ) -> BadgeResult<()> {
        let role = style
            .font
            .ok_or_else(|| BadgeError::render("text draw requires a font role"))?;
        let brush = TextBrushRgba8 {
            r: style.color.r,
            g: style.color.g,
            b: style.color.b,
            a: style.color.a,
        };
        let layout = self.shape(text, role, style.font_size, brush)?;
        let font = self.face(role).data.clone();

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                // Positioned glyphs are relative to the layout's top-left; shift so the run's
                // baseline lands on `origin`.
                let dx = origin.x as f32;
                let dy = origin.y as f32 - run.baseline();
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x + dx,
                    y: g.y + dy,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }
}

fn read_font(path: &Path) -> BadgeResult<Vec<u8>> {
    std::fs::read(path)
        .with_context(|| format!("read font bytes from '{}'", path.display()))
        .map_err(BadgeError::from)
}

fn register(font_ctx: &mut parley::FontContext, bytes: Vec<u8>) -> BadgeResult<LoadedFace> {
    if bytes.is_empty() {
        return Err(BadgeError::decode("font file is empty"));
    }
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| BadgeError::decode("no font families registered from font bytes"))?;
    let family = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| BadgeError::decode("registered font family has no name"))?
        .to_string();

    Ok(LoadedFace {
        family,
        data: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
