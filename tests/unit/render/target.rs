use super::*;

#[test]
fn writes_accumulate_per_node() {
    let mut t = RecordingTarget::new();
    let title = NodeId::new("title");
    t.write(&title, MappedOutput::new(Property::Scale, 0.8));
    t.write(&title, MappedOutput::new(Property::Opacity, 0.5));
    t.set_pinned(&title, true);

    let p = t.presentation(&title).unwrap();
    assert_eq!(p.scale.x, 0.8);
    assert_eq!(p.opacity, 0.5);
    assert!(p.pinned);
    assert_eq!(t.value("title", Property::Scale), Some(0.8));
    assert_eq!(t.writes_for("title"), 2);
}

#[test]
fn clear_log_keeps_state() {
    let mut t = RecordingTarget::new();
    t.write(&NodeId::new("a"), MappedOutput::new(Property::Rotate, 15.0));
    t.clear_log();
    assert!(t.log().is_empty());
    assert_eq!(t.value("a", Property::Rotate), Some(15.0));
    assert_eq!(t.value("missing", Property::Rotate), None);
}

#[test]
fn property_names_are_snake_case() {
    assert_eq!(
        serde_json::to_string(&Property::TranslateY).unwrap(),
        "\"translate_y\""
    );
    let p: Property = serde_json::from_str("\"z_index\"").unwrap();
    assert_eq!(p, Property::ZIndex);
}
