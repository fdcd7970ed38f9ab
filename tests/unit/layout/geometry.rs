use super::*;

fn solid(width: u32, height: u32) -> RasterImage {
    RasterImage::from_straight_rgba8(width, height, vec![255; (width * height * 4) as usize])
        .unwrap()
}

#[test]
fn circle_follows_background_ratios() {
    let ratios = LayoutRatios::default();
    for (w, h) in [(1000u32, 1500u32), (640, 480), (1, 1)] {
        let g = InsertGeometry::for_canvas(Canvas::new(w, h).unwrap(), &ratios);
        assert_eq!(g.center, Point::new(f64::from(w) / 2.0, f64::from(h) * 0.6));
        assert!((g.radius - f64::from(h) / 6.0).abs() < 1e-9);
        assert!((g.diameter() - f64::from(h) / 3.0).abs() < 1e-9);
    }
}

#[test]
fn foreground_height_tracks_scale_and_keeps_aspect() {
    let ratios = LayoutRatios::default();
    let g = InsertGeometry::for_canvas(Canvas::new(1000, 1500).unwrap(), &ratios);
    let fg = solid(300, 200);

    for scale in [0.6, 1.0, 1.337, 1.6] {
        let size = g.foreground_size(&fg, scale);
        let expected_h = 0.9 * (1500.0 / 3.0) * scale;
        assert!((size.y - expected_h).abs() < 1e-9);
        assert!((size.x / size.y - 1.5).abs() < 1e-12);
    }
}

#[test]
fn square_foreground_in_500px_circle() {
    let g = InsertGeometry::for_canvas(Canvas::new(1000, 1500).unwrap(), &LayoutRatios::default());
    let fg = solid(400, 400);
    let rect = g.foreground_rect(&fg, 1.0, Vec2::ZERO);
    assert!((rect.height() - 450.0).abs() < 1e-9);
    assert!((rect.width() - 450.0).abs() < 1e-9);
    assert_eq!(rect.origin(), Point::ZERO);
}

#[test]
fn centered_offset_centres_the_draw_rect() {
    let g = InsertGeometry::for_canvas(Canvas::new(1000, 1500).unwrap(), &LayoutRatios::default());
    let fg = solid(400, 800);
    let offset = g.centered_offset(&fg, 1.0);
    let rect = g.foreground_rect(&fg, 1.0, offset);
    assert!((rect.center().x - 500.0).abs() < 1e-9);
    assert!((rect.center().y - 900.0).abs() < 1e-9);
}

#[test]
fn frame_and_text_anchor_scale_with_width() {
    let canvas = Canvas::new(1000, 1500).unwrap();
    let ratios = LayoutRatios::default();

    let frame = FrameGeometry::for_canvas(canvas, &ratios);
    assert!((frame.stroke_width - 15.0).abs() < 1e-9);
    assert!((frame.rect.x0 - 7.5).abs() < 1e-9);
    assert!((frame.rect.x1 - 992.5).abs() < 1e-9);

    let anchor = TextAnchor::for_canvas(canvas, &ratios);
    assert_eq!(anchor.center_x, 500.0);
    assert!((anchor.top_y - 390.0).abs() < 1e-9);
    assert!((anchor.max_width - 840.0).abs() < 1e-9);
    assert!((anchor.font_size - 55.0).abs() < 1e-4);
}
