use super::*;

#[test]
fn progress_clamps_into_unit_interval() {
    assert_eq!(Progress::new(-0.5).get(), 0.0);
    assert_eq!(Progress::new(1.5).get(), 1.0);
    assert_eq!(Progress::new(0.25).get(), 0.25);
    assert_eq!(Progress::new(f64::NAN), Progress::ZERO);
    assert_eq!(Progress::new(f64::INFINITY), Progress::ONE);
}

#[test]
fn progress_deserialize_clamps() {
    let p: Progress = serde_json::from_str("3.0").unwrap();
    assert_eq!(p, Progress::ONE);
}

#[test]
fn axis_selects_components() {
    let r = Rect::new(10.0, 20.0, 110.0, 70.0);
    assert_eq!(Axis::Y.span_of(r), (20.0, 50.0));
    assert_eq!(Axis::X.span_of(r), (10.0, 100.0));

    let m = ScrollMetrics {
        offset: Vec2::new(5.0, 300.0),
        viewport: Size::new(1280.0, 800.0),
    };
    assert_eq!(m.along(Axis::Y), (300.0, 800.0));
    assert_eq!(m.along(Axis::X), (5.0, 1280.0));
}

#[test]
fn ids_serialize_as_plain_strings() {
    let id = NodeId::new("hero-title");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"hero-title\"");
    assert_eq!(ElementId::new("hero").to_string(), "hero");
}
