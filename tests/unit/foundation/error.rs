use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RenderError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(RenderError::render("x").to_string().contains("render error:"));
    assert!(RenderError::encode("x").to_string().contains("encode error:"));
    assert!(
        RenderError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RenderError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
