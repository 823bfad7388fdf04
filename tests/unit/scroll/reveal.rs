use super::*;
use crate::foundation::core::{Rect, Size, Vec2};

fn metrics_at(y: f64) -> ScrollMetrics {
    ScrollMetrics {
        offset: Vec2::new(0.0, y),
        viewport: Size::new(1000.0, 800.0),
    }
}

#[test]
fn visible_fraction_tracks_overlap() {
    let card = Rect::new(0.0, 1000.0, 1000.0, 1400.0);
    assert_eq!(visible_fraction(card, metrics_at(0.0), Axis::Y, 0.0), 0.0);
    assert_eq!(visible_fraction(card, metrics_at(300.0), Axis::Y, 0.0), 0.25);
    assert_eq!(visible_fraction(card, metrics_at(800.0), Axis::Y, 0.0), 1.0);
    assert_eq!(visible_fraction(card, metrics_at(5000.0), Axis::Y, 0.0), 0.0);
}

#[test]
fn negative_margin_shrinks_the_viewport() {
    let card = Rect::new(0.0, 1000.0, 1000.0, 1400.0);
    // Viewport [300, 1100] shrunk by 150 on both ends -> [450, 950]: no overlap.
    assert_eq!(visible_fraction(card, metrics_at(300.0), Axis::Y, -150.0), 0.0);
    // Margin larger than half the viewport collapses it.
    assert_eq!(visible_fraction(card, metrics_at(800.0), Axis::Y, -500.0), 0.0);
}

#[test]
fn amount_threshold_and_leave() {
    let mut s = RevealState::new(RevealConfig {
        amount: 0.3,
        once: false,
        margin_px: 0.0,
    })
    .unwrap();
    assert_eq!(s.update(0.1), None);
    assert_eq!(s.update(0.3), Some(RevealEvent::Enter));
    assert_eq!(s.update(0.9), None);
    assert_eq!(s.update(0.2), Some(RevealEvent::Leave));
    assert_eq!(s.update(0.5), Some(RevealEvent::Enter));
}

#[test]
fn once_fires_a_single_enter() {
    let mut s = RevealState::new(RevealConfig::default()).unwrap();
    assert_eq!(s.update(0.01), Some(RevealEvent::Enter));
    assert!(s.is_spent());
    assert_eq!(s.update(0.0), None);
    assert_eq!(s.update(1.0), None);
    assert!(s.is_visible());
}

#[test]
fn rejects_out_of_range_amount() {
    assert!(
        RevealState::new(RevealConfig {
            amount: 1.5,
            ..RevealConfig::default()
        })
        .is_err()
    );
}
