use super::*;

#[derive(Default)]
struct Recorder {
    shared: Vec<(String, String, String, usize)>,
}

impl ShareTarget for Recorder {
    fn share(&mut self, payload: &SharePayload<'_>) -> BadgeResult<()> {
        self.shared.push((
            payload.title.to_string(),
            payload.text.to_string(),
            payload.filename.to_string(),
            payload.png.len(),
        ));
        Ok(())
    }
}

fn half_transparent_red() -> RenderedBadge {
    RenderedBadge {
        width: 2,
        height: 1,
        data: vec![128, 0, 0, 128, 0, 0, 0, 0],
        premultiplied: true,
    }
}

#[test]
fn png_is_straight_alpha() {
    let png = encode_png(&half_transparent_red()).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(decoded.get_pixel(1, 0).0[3], 0);
}

#[test]
fn mismatched_buffer_is_an_export_error() {
    let mut frame = half_transparent_red();
    frame.data.truncate(4);
    assert!(matches!(encode_png(&frame), Err(BadgeError::Export(_))));
}

#[test]
fn download_writes_the_configured_filename() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = DownloadDir::new(tmp.path().join("out"));
    let outcome = dir.save(b"PNGDATA", "web3-talents.png").unwrap();
    let expected = tmp.path().join("out").join("web3-talents.png");
    assert_eq!(outcome, ExportOutcome::Saved(expected.clone()));
    assert_eq!(std::fs::read(expected).unwrap(), b"PNGDATA");
}

#[test]
fn empty_buffer_skips_delivery() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = DownloadDir::new(tmp.path());
    assert_eq!(dir.save(&[], "x.png").unwrap(), ExportOutcome::Skipped);
    assert!(!tmp.path().join("x.png").exists());

    let mut rec = Recorder::default();
    let outcome = share_png(Some(&mut rec), &ExportConfig::default(), &[]).unwrap();
    assert_eq!(outcome, ExportOutcome::Skipped);
    assert!(rec.shared.is_empty());
}

#[test]
fn share_without_target_is_skipped() {
    let outcome = share_png(None, &ExportConfig::default(), b"PNG").unwrap();
    assert_eq!(outcome, ExportOutcome::Skipped);
}

#[test]
fn share_carries_title_caption_and_filename() {
    let mut rec = Recorder::default();
    let outcome = share_png(Some(&mut rec), &ExportConfig::default(), b"PNG").unwrap();
    assert_eq!(outcome, ExportOutcome::Shared);
    assert_eq!(
        rec.shared,
        vec![(
            "Web3 Talents".to_string(),
            "I\u{2019}m officially part of the Web3 Talents Program \u{1f680}".to_string(),
            "web3-talents.png".to_string(),
            3
        )]
    );
}

#[test]
fn directory_like_filename_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = DownloadDir::new(tmp.path());
    assert!(dir.save(b"PNG", "..").is_err());
}
