use super::*;
use crate::removal::Passthrough;

fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn failing(_: &[u8]) -> BadgeResult<Vec<u8>> {
    Err(BadgeError::removal("service unavailable"))
}

#[test]
fn latest_initiated_upload_wins() {
    let mut uploads = UploadSession::default();
    let a = uploads.begin();
    let b = uploads.begin();
    assert!(a < b);

    assert!(!uploads.complete(a));
    assert!(uploads.complete(b));
    assert_eq!(uploads.pending(), None);
}

#[test]
fn completion_is_accepted_once() {
    let mut uploads = UploadSession::default();
    let a = uploads.begin();
    assert!(uploads.is_current(a));
    assert!(uploads.complete(a));
    assert!(!uploads.complete(a));
}

#[test]
fn stale_completion_does_not_settle_the_newer_upload() {
    let mut uploads = UploadSession::default();
    let a = uploads.begin();
    let b = uploads.begin();
    assert!(!uploads.complete(a));
    assert_eq!(uploads.pending(), Some(b));
}

#[test]
fn successful_removal_decodes_the_cutout() {
    let cutout = |_: &[u8]| -> BadgeResult<Vec<u8>> { Ok(png(3, 2, [0, 0, 0, 0])) };
    let out = prepare_cutout(&cutout, &png(8, 8, [9, 9, 9, 255]), RemovalFallback::Abort).unwrap();
    assert!(out.background_removed);
    assert_eq!((out.image.width, out.image.height), (3, 2));
}

#[test]
fn use_original_falls_back_to_the_photo() {
    let photo = png(5, 4, [200, 10, 10, 255]);
    let out = prepare_cutout(&failing, &photo, RemovalFallback::UseOriginal).unwrap();
    assert!(!out.background_removed);
    assert_eq!((out.image.width, out.image.height), (5, 4));
}

#[test]
fn abort_surfaces_the_removal_error() {
    let photo = png(5, 4, [200, 10, 10, 255]);
    let err = prepare_cutout(&failing, &photo, RemovalFallback::Abort).unwrap_err();
    assert!(matches!(err, BadgeError::Removal(_)));
}

#[test]
fn undecodable_cutout_counts_as_a_failed_removal() {
    let garbage = |_: &[u8]| -> BadgeResult<Vec<u8>> { Ok(vec![1, 2, 3]) };
    let photo = png(2, 2, [1, 2, 3, 255]);

    let err = prepare_cutout(&garbage, &photo, RemovalFallback::Abort).unwrap_err();
    assert!(matches!(err, BadgeError::Removal(_)));

    let out = prepare_cutout(&garbage, &photo, RemovalFallback::UseOriginal).unwrap();
    assert!(!out.background_removed);
}

#[test]
fn undecodable_photo_is_a_decode_error() {
    let err = prepare_cutout(&failing, b"not an image", RemovalFallback::UseOriginal).unwrap_err();
    assert!(matches!(err, BadgeError::Decode(_)));
    let err = prepare_cutout(&Passthrough, &[], RemovalFallback::UseOriginal).unwrap_err();
    assert!(matches!(err, BadgeError::Decode(_)));
}

#[test]
fn fallback_serializes_as_snake_case() {
    assert_eq!(
        serde_json::to_string(&RemovalFallback::UseOriginal).unwrap(),
        "\"use_original\""
    );
    assert_eq!(RemovalFallback::default(), RemovalFallback::UseOriginal);
}
