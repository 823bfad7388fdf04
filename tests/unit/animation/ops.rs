use super::*;
use crate::animation::ease::Ease;

#[test]
fn fade_window_ramps_opacity() {
    let m = fade_window(0.2, 0.4).unwrap();
    assert_eq!(m.evaluate(0.1), 0.0);
    assert!((m.evaluate(0.3) - 0.5).abs() < 1e-12);
    assert_eq!(m.evaluate(0.5), 1.0);
}

#[test]
fn stagger_produces_sequential_windows() {
    // Blueprint parts: twelve windows of 0.08 starting at 0.
    let parts = stagger(12, 0.0, 0.08, 0.0, 1.0).unwrap();
    assert_eq!(parts.len(), 12);

    let p = 0.2;
    let visible: Vec<f64> = parts.iter().map(|m| m.evaluate(p)).collect();
    assert_eq!(visible[0], 1.0);
    assert_eq!(visible[1], 1.0);
    assert!(visible[2] > 0.0 && visible[2] < 1.0);
    assert!(visible[3..].iter().all(|&v| v == 0.0));

    assert!(parts.iter().all(|m| m.evaluate(1.0) == 1.0));
}

#[test]
fn stagger_rejects_negative_step() {
    assert!(stagger(3, 0.0, -0.1, 0.0, 1.0).is_err());
    assert!(stagger(0, 0.0, 0.1, 0.0, 1.0).unwrap().is_empty());
}

#[test]
fn mirror_negates_values_and_keeps_ease() {
    let m = Mapping::from_pairs(&[0.0, 1.0], &[-120.0, 0.0])
        .unwrap()
        .with_ease(Ease::OutCubic);
    let r = mirror(&m);
    assert_eq!(r.evaluate(0.0), 120.0);
    assert_eq!(r.ease(), Ease::OutCubic);
}
