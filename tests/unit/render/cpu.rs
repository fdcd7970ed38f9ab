use super::*;
use crate::{
    foundation::core::Vec2,
    layout::text::FontRole,
};

struct NoText;

impl TextMeasure for NoText {
    fn advance(&mut self, _text: &str, _font: FontRole, _size_px: f32) -> BadgeResult<f64> {
        Err(BadgeError::layout("no fonts in this test"))
    }
}

impl Typesetter for NoText {
    fn draw_run(
        &mut self,
        _ctx: &mut vello_cpu::RenderContext,
        _text: &str,
        _origin: Point,
        _style: &DrawStyle,
    ) -> BadgeResult<()> {
        Err(BadgeError::render("no fonts in this test"))
    }
}

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RasterImage {
    let data = rgba.repeat((width * height) as usize);
    RasterImage::from_straight_rgba8(width, height, data).unwrap()
}

#[test]
fn missing_background_is_a_silent_no_op() {
    let mut comp = Compositor::new(BadgeConfig::default());
    let mut scene = SceneState::default();
    scene.set_name("Ada");
    scene.set_foreground(solid(4, 4, [255, 0, 0, 255]), &comp.config().layout);
    assert!(comp.render(&scene, &mut NoText).unwrap().is_none());
}

#[test]
fn blank_name_skips_text_entirely() {
    let mut comp = Compositor::new(BadgeConfig::default());
    let mut scene = SceneState::default();
    scene.set_background(solid(60, 90, [10, 20, 30, 255]));
    scene.set_name("   ");

    assert!(comp.layout_text(&scene, &mut NoText).unwrap().is_none());
    let frame = comp.render(&scene, &mut NoText).unwrap().unwrap();
    assert_eq!((frame.width, frame.height), (60, 90));
    assert!(frame.premultiplied);
}

#[test]
fn surface_size_ignores_foreground_scale() {
    let mut comp = Compositor::new(BadgeConfig::default());
    let mut scene = SceneState::default();
    scene.set_background(solid(60, 90, [10, 20, 30, 255]));
    scene.set_foreground(solid(300, 300, [0, 255, 0, 255]), &comp.config().layout);
    scene.set_scale(1.6);
    scene.set_offset(Vec2::new(-100.0, -100.0));

    let frame = comp.render(&scene, &mut NoText).unwrap().unwrap();
    assert_eq!((frame.width, frame.height), (60, 90));
    assert_eq!(frame.data.len(), 60 * 90 * 4);
}

#[test]
fn image_paints_are_cached_by_pixel_storage() {
    let mut comp = Compositor::new(BadgeConfig::default());
    let img = solid(2, 2, [1, 2, 3, 255]);
    comp.image_paint_for(&img).unwrap();
    comp.image_paint_for(&img.clone()).unwrap();
    assert_eq!(comp.image_cache.len(), 1);

    for _ in 0..IMAGE_CACHE_CAPACITY + 2 {
        comp.image_paint_for(&solid(1, 1, [0, 0, 0, 255])).unwrap();
    }
    assert_eq!(comp.image_cache.len(), IMAGE_CACHE_CAPACITY);
}

#[test]
fn pixmap_conversion_checks_lengths() {
    let mut img = solid(2, 2, [1, 2, 3, 128]);
    assert!(image_to_pixmap(&img).is_ok());
    img.rgba8_premul = Arc::new(vec![0; 3]);
    assert!(image_to_pixmap(&img).is_err());
}
