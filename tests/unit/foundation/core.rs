use super::*;

#[test]
fn canvas_rejects_empty_and_oversized() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());

    let c = Canvas::new(1000, 1500).unwrap();
    assert_eq!(c.to_u16().unwrap(), (1000, 1500));

    let huge = Canvas {
        width: 70_000,
        height: 10,
    };
    assert!(huge.to_u16().is_err());
}

#[test]
fn hex_colors_parse_and_format() {
    let accent = Rgba8::from_hex("#2563eb").unwrap();
    assert_eq!(accent, Rgba8::opaque(0x25, 0x63, 0xeb));
    assert_eq!(accent.to_hex(), "#2563eb");

    let translucent = Rgba8::from_hex("#ffffff80").unwrap();
    assert_eq!(translucent.a, 0x80);
    assert_eq!(translucent.to_hex(), "#ffffff80");

    assert!(Rgba8::from_hex("2563eb").is_err());
    assert!(Rgba8::from_hex("#2563e").is_err());
    assert!(Rgba8::from_hex("#zz63eb").is_err());
}

#[test]
fn colors_serialize_as_hex_strings() {
    let json = serde_json::to_string(&Rgba8::opaque(255, 255, 255)).unwrap();
    assert_eq!(json, "\"#ffffff\"");
    let back: Rgba8 = serde_json::from_str("\"#2563eb\"").unwrap();
    assert_eq!(back, Rgba8::opaque(0x25, 0x63, 0xeb));
    assert!(serde_json::from_str::<Rgba8>("\"blue\"").is_err());
}
