use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrollfxError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        ScrollfxError::unattached("x")
            .to_string()
            .contains("unattached reference:")
    );
    assert!(
        ScrollfxError::tracking("x")
            .to_string()
            .contains("tracking error:")
    );
    assert!(
        ScrollfxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrollfxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_convert() {
    let err: ScrollfxError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ScrollfxError::Serde(_)));
}
