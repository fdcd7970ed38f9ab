use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let prepared = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_rejects_garbage_and_empty_payloads() {
    assert!(matches!(decode_image(b""), Err(BadgeError::Decode(_))));
    assert!(matches!(
        decode_image(b"definitely not an image"),
        Err(BadgeError::Decode(_))
    ));
}

#[test]
fn straight_constructor_checks_length_and_reports_aspect() {
    assert!(RasterImage::from_straight_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(RasterImage::from_straight_rgba8(0, 2, vec![]).is_err());

    let img = RasterImage::from_straight_rgba8(4, 2, vec![255; 32]).unwrap();
    assert_eq!(img.aspect_ratio(), 2.0);
    assert_eq!(img.canvas().width, 4);
}

#[test]
fn load_image_reports_missing_file() {
    let err = load_image(std::path::Path::new("does/not/exist.png")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.png"));
}

#[test]
fn decode_rejects_images_beyond_the_surface_limit() {
    let wide = image::RgbaImage::from_pixel(70_000, 1, image::Rgba([1, 2, 3, 255]));
    let err = decode_image(&png_bytes(wide)).unwrap_err();
    assert!(matches!(err, BadgeError::Decode(_)));
    assert!(err.to_string().contains("70000x1"));

    let edge = image::RgbaImage::from_pixel(u32::from(u16::MAX), 1, image::Rgba([1, 2, 3, 255]));
    assert_eq!(decode_image(&png_bytes(edge)).unwrap().width, 65_535);
}
