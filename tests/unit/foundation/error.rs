use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BadgeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(BadgeError::decode("x").to_string().contains("decode error:"));
    assert!(BadgeError::layout("x").to_string().contains("layout error:"));
    assert!(BadgeError::render("x").to_string().contains("render error:"));
    assert!(
        BadgeError::removal("x")
            .to_string()
            .contains("background removal error:")
    );
    assert!(BadgeError::export("x").to_string().contains("export error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BadgeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
