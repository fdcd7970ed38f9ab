use super::*;

fn solid(width: u32, height: u32) -> RasterImage {
    RasterImage::from_straight_rgba8(width, height, vec![200; (width * height * 4) as usize])
        .unwrap()
}

#[test]
fn name_is_truncated_to_limit_in_chars() {
    let mut s = SceneState::default();
    s.set_name("ÄÖÜ-abcdefghijklmnopqrstuvwxyz-0123456789");
    assert_eq!(s.name().chars().count(), 30);
    assert!(s.name().starts_with("ÄÖÜ-"));

    s.set_name("   ");
    assert_eq!(s.display_name(), None);
    s.set_name("  Ada ");
    assert_eq!(s.display_name(), Some("Ada"));
}

#[test]
fn scale_is_clamped() {
    let mut s = SceneState::default();
    assert_eq!(s.scale(), 1.0);
    assert_eq!(s.set_scale(3.0), 1.6);
    assert_eq!(s.set_scale(0.0), 0.6);
    assert_eq!(s.set_scale(1.25), 1.25);
}

#[test]
fn new_foreground_resets_placement_to_circle_centre() {
    let ratios = LayoutRatios::default();
    let mut s = SceneState::default();
    s.set_background(solid(1000, 1500));
    s.set_foreground(solid(400, 400), &ratios);
    s.set_scale(1.5);
    s.set_offset(Vec2::new(-50.0, 10.0));

    s.set_foreground(solid(200, 400), &ratios);
    assert_eq!(s.scale(), 1.0);
    // 450px tall, 225px wide, centred on (500, 900).
    assert!((s.offset().x - 387.5).abs() < 1e-9);
    assert!((s.offset().y - 675.0).abs() < 1e-9);
    assert_eq!(s.foreground().map(|f| f.width), Some(200));
}

#[test]
fn foreground_without_background_starts_at_origin() {
    let mut s = SceneState::default();
    s.set_foreground(solid(10, 10), &LayoutRatios::default());
    assert_eq!(s.offset(), Vec2::ZERO);
    assert!(s.canvas().is_none());
}

#[test]
fn non_finite_offsets_are_ignored() {
    let mut s = SceneState::default();
    s.set_offset(Vec2::new(3.0, 4.0));
    s.set_offset(Vec2::new(f64::INFINITY, 0.0));
    assert_eq!(s.offset(), Vec2::new(3.0, 4.0));
}
