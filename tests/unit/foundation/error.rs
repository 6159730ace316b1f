use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ClipError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ClipError::storage("x").to_string().contains("storage error:"));
    assert!(ClipError::render("x").to_string().contains("render error:"));
    assert!(
        ClipError::metadata("x")
            .to_string()
            .contains("metadata error:")
    );
    assert!(
        ClipError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk gone");
    let err = ClipError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk gone"));
}
