use std::sync::Arc;

use vello_cpu::kurbo::Shape as _;

use crate::{
    assets::decode::RasterImage,
    foundation::{
        core::{Circle, Point, Rect},
        error::{BadgeError, BadgeResult},
    },
    layout::{
        geometry::{FrameGeometry, InsertGeometry, TextAnchor},
        text::{TextBlock, TextLayoutParams, TextMeasure, layout_text},
    },
    render::backend::{DrawStyle, RenderedBadge, Typesetter},
    scene::{config::BadgeConfig, model::SceneState},
};

const PATH_TOLERANCE: f64 = 0.1;

/// Enough for the background plus the current foreground.
const IMAGE_CACHE_CAPACITY: usize = 4;

/// CPU compositor for badge scenes.
///
/// A render is one synchronous pass over a fresh surface sized exactly like the background.
/// Layers are drawn in a fixed order, each later layer occluding the earlier ones:
///
/// 1. background at 1:1
/// 2. decorative frame
/// 3. wrapped sentence (only when the trimmed name is non-empty)
/// 4. white insert backdrop
/// 5. foreground, clipped to the insert circle
/// 6. accent border around the circle
pub struct Compositor {
    config: BadgeConfig,
    image_cache: Vec<(Arc<Vec<u8>>, vello_cpu::Image)>,
}

impl Compositor {
    /// Compositor drawing with `config`.
    pub fn new(config: BadgeConfig) -> Self {
        Self {
            config,
            image_cache: Vec::new(),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &BadgeConfig {
        &self.config
    }

    /// Lay out the sentence for `scene`, or `None` when there is no background or no name.
    pub fn layout_text(
        &self,
        scene: &SceneState,
        measure: &mut dyn TextMeasure,
    ) -> BadgeResult<Option<TextBlock>> {
        let (Some(canvas), Some(name)) = (scene.canvas(), scene.display_name()) else {
            return Ok(None);
        };
        let anchor = TextAnchor::for_canvas(canvas, &self.config.layout);
        let params = TextLayoutParams {
            max_width: anchor.max_width,
            font_size: anchor.font_size,
            line_height_ratio: self.config.layout.line_height,
            center_x: anchor.center_x,
            top_y: anchor.top_y,
        };
        let sentence = self.config.sentence_for(name);
        layout_text(measure, &sentence, &params, &self.config.split_token).map(Some)
    }

    /// Render `scene`. Returns `Ok(None)` without drawing anything when no background is set.
    #[tracing::instrument(skip_all, fields(name = scene.name(), scale = scene.scale()))]
    pub fn render(
        &mut self,
        scene: &SceneState,
        typesetter: &mut dyn Typesetter,
    ) -> BadgeResult<Option<RenderedBadge>> {
        let Some(background) = scene.background() else {
            tracing::debug!("no background loaded; render skipped");
            return Ok(None);
        };
        let canvas = background.canvas();
        let (width, height) = canvas.to_u16()?;
        let text = self.layout_text(scene, &mut *typesetter)?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        let palette = self.config.palette;

        let bg_paint = self.image_paint_for(background)?;
        fill_image(
            &mut ctx,
            &bg_paint,
            background,
            Rect::new(0.0, 0.0, canvas.w(), canvas.h()),
        );

        if palette.draw_frame {
            let frame = FrameGeometry::for_canvas(canvas, &self.config.layout);
            if frame.stroke_width > 0.0 {
                let path = rect_to_cpu(frame.rect).to_path(PATH_TOLERANCE);
                stroke_path(
                    &mut ctx,
                    &path,
                    &DrawStyle::stroke(palette.frame, frame.stroke_width),
                );
            }
        }

        if let Some(block) = &text {
            for line in &block.lines {
                let baseline = block.baseline(line);
                for run in &line.runs {
                    let style = DrawStyle::text(palette.text, run.font, block.font_size);
                    typesetter.draw_run(&mut ctx, &run.text, Point::new(run.x, baseline), &style)?;
                }
            }
        }

        let insert = InsertGeometry::for_canvas(canvas, &self.config.layout);
        let circle = circle_to_cpu(insert.circle());
        fill_path(&mut ctx, &circle, &DrawStyle::fill(palette.insert_fill));

        if let Some(foreground) = scene.foreground() {
            let fg_paint = self.image_paint_for(foreground)?;
            let dest = insert.foreground_rect(foreground, scene.scale(), scene.offset());
            tracing::debug!(?dest, "drawing foreground");
            with_clip(&mut ctx, &circle, |ctx| {
                fill_image(ctx, &fg_paint, foreground, dest);
            });
        }

        if palette.accent_width_px > 0.0 {
            stroke_path(
                &mut ctx,
                &circle,
                &DrawStyle::stroke(palette.accent, palette.accent_width_px),
            );
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(Some(RenderedBadge {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }))
    }

    fn image_paint_for(&mut self, image: &RasterImage) -> BadgeResult<vello_cpu::Image> {
        if let Some((_, paint)) = self
            .image_cache
            .iter()
            .find(|(bytes, _)| Arc::ptr_eq(bytes, &image.rgba8_premul))
        {
            return Ok(paint.clone());
        }

        let pixmap = image_to_pixmap(image)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        if self.image_cache.len() >= IMAGE_CACHE_CAPACITY {
            self.image_cache.remove(0);
        }
        self.image_cache
            .push((image.rgba8_premul.clone(), paint.clone()));
        Ok(paint)
    }
}

fn fill_image(
    ctx: &mut vello_cpu::RenderContext,
    paint: &vello_cpu::Image,
    image: &RasterImage,
    dest: Rect,
) {
    let sx = dest.width() / f64::from(image.width);
    let sy = dest.height() / f64::from(image.height);
    let transform = vello_cpu::kurbo::Affine::translate((dest.x0, dest.y0))
        * vello_cpu::kurbo::Affine::scale_non_uniform(sx, sy);

    ctx.set_transform(transform);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(paint.clone());
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(image.width),
        f64::from(image.height),
    ));
}

fn fill_path(ctx: &mut vello_cpu::RenderContext, path: &vello_cpu::kurbo::BezPath, style: &DrawStyle) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(style.paint());
    ctx.fill_path(path);
}

fn stroke_path(
    ctx: &mut vello_cpu::RenderContext,
    path: &vello_cpu::kurbo::BezPath,
    style: &DrawStyle,
) {
    let Some(width) = style.stroke_width else {
        return fill_path(ctx, path, style);
    };
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
    ctx.set_paint(style.paint());
    ctx.stroke_path(path);
}

/// Run `draw` with `clip` active; the clip layer is always popped before returning.
fn with_clip(
    ctx: &mut vello_cpu::RenderContext,
    clip: &vello_cpu::kurbo::BezPath,
    draw: impl FnOnce(&mut vello_cpu::RenderContext),
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.push_clip_layer(clip);
    draw(ctx);
    ctx.pop_layer();
}

fn circle_to_cpu(c: Circle) -> vello_cpu::kurbo::BezPath {
    vello_cpu::kurbo::Circle::new((c.center.x, c.center.y), c.radius).to_path(PATH_TOLERANCE)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn image_to_pixmap(image: &RasterImage) -> BadgeResult<vello_cpu::Pixmap> {
    let (w, h) = image.canvas().to_u16()?;
    let bytes = image.rgba8_premul.as_slice();
    if bytes.len() != image.width as usize * image.height as usize * 4 {
        return Err(BadgeError::render("raster image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(image.width as usize * image.height as usize);
    for px in bytes.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
