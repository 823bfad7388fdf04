use super::*;

const ALL: [Ease; 7] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
];

#[test]
fn every_curve_fixes_endpoints() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(9.0), 1.0);
    }
}

#[test]
fn in_out_curves_are_symmetric_at_midpoint() {
    assert!((Ease::InOutQuad.apply(0.5) - 0.5).abs() < 1e-12);
    assert!((Ease::InOutCubic.apply(0.5) - 0.5).abs() < 1e-12);
    assert!(Ease::InQuad.apply(0.5) < 0.5);
    assert!(Ease::OutQuad.apply(0.5) > 0.5);
}

#[test]
fn serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&Ease::InOutCubic).unwrap(),
        "\"in_out_cubic\""
    );
}

#[test]
fn parses_the_serialized_names() {
    for ease in ALL {
        let name = serde_json::to_string(&ease).unwrap();
        assert_eq!(name.trim_matches('"').parse::<Ease>().unwrap(), ease);
    }
    assert!("bounce".parse::<Ease>().is_err());
}
