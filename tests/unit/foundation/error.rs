use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SpriteError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SpriteError::decode("x").to_string().contains("decode error:"));
    assert!(SpriteError::encode("x").to_string().contains("encode error:"));
    assert!(
        SpriteError::transient("x")
            .to_string()
            .contains("generation service error:")
    );
    assert!(SpriteError::Busy(GroupId(3)).to_string().contains("group 3"));
}

#[test]
fn only_transient_service_errors_retry() {
    assert!(SpriteError::transient("overloaded").is_transient());
    assert!(!SpriteError::service("bad prompt").is_transient());
    assert!(!SpriteError::decode("bad png").is_transient());
    assert!(!SpriteError::NoFrames.is_transient());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SpriteError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
