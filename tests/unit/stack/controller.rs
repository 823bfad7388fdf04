use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn cards(n: usize) -> Vec<StackItem<&'static str>> {
    StackItem::sequence(["one", "two", "three", "four", "five"].into_iter().take(n))
}

#[test]
fn zero_items_is_empty() {
    let out = layout(&cards(0), Progress::new(0.5), &StackConfig::default());
    assert!(out.is_empty());
}

#[test]
fn single_item_is_always_active() {
    let cfg = StackConfig::default();
    for p in [0.0, 0.3, 0.99, 1.0] {
        let out = layout(&cards(1), Progress::new(p), &cfg);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].phase, StackPhase::Active);
        assert_eq!(out[0].scale, 1.0);
        assert!(out[0].pinned);
    }
}

#[test]
fn middle_of_three_is_exclusively_active() {
    let cfg = StackConfig::default();
    let out = layout(&cards(3), Progress::new(0.5), &cfg);

    assert_eq!(out[0].phase, StackPhase::Stacked);
    assert!(out[0].scale < 1.0);
    assert!(out[0].pinned);

    assert_eq!(out[1].phase, StackPhase::Active);
    assert_eq!(out[1].scale, 1.0);
    assert!(out[1].pinned);

    assert_eq!(out[2].phase, StackPhase::Upcoming);
    assert!(!out[2].pinned);
    assert_eq!(out[2].scale, cfg.base_scale);
}

#[test]
fn stacked_items_pin_with_per_item_distance() {
    let cfg = StackConfig {
        stack_position: 120.0,
        ..StackConfig::default()
    };
    let out = layout_count(3, Progress::ONE, &cfg);
    assert_eq!(out[0].offset, 120.0);
    assert_eq!(out[1].offset, 160.0);
    assert_eq!(out[2].offset, 200.0);
    // Deeper items recede further but never below base_scale.
    assert!(approx(out[0].scale, 0.9));
    assert!(approx(out[1].scale, 0.95));
    assert_eq!(out[2].phase, StackPhase::Active);
}

#[test]
fn handoff_interpolates_both_neighbours() {
    let cfg = StackConfig {
        handoff: 0.5,
        ..StackConfig::default()
    };
    // Two items: boundary at 0.5, ramp [0.25, 0.5].
    let out = layout_count(2, Progress::new(0.375), &cfg);
    assert_eq!(out[0].phase, StackPhase::Leaving);
    assert!(out[0].pinned);
    assert!(approx(out[0].scale, 0.975));
    assert_eq!(out[1].phase, StackPhase::Entering);
    assert!(!out[1].pinned);
    assert!(approx(out[1].scale, 0.9));
    assert!(approx(out[1].offset, 40.0 + 0.5 * cfg.item_distance));
}

#[test]
fn zero_handoff_is_a_step_where_the_later_item_wins() {
    let cfg = StackConfig {
        handoff: 0.0,
        ..StackConfig::default()
    };
    let before = layout_count(2, Progress::new(0.4999), &cfg);
    assert_eq!(before[0].phase, StackPhase::Active);
    assert_eq!(before[1].phase, StackPhase::Upcoming);

    let at = layout_count(2, Progress::new(0.5), &cfg);
    assert_eq!(at[0].phase, StackPhase::Stacked);
    assert_eq!(at[1].phase, StackPhase::Active);
}

#[test]
fn never_two_fully_active_items() {
    let cfg = StackConfig::default();
    for step in 0..=200 {
        let p = Progress::new(step as f64 / 200.0);
        let out = layout_count(4, p, &cfg);
        let active = out.iter().filter(|pl| pl.is_fully_active()).count();
        assert!(active <= 1, "progress {p}: {active} active items");
        if active == 0 {
            let entering = out.iter().filter(|pl| pl.phase == StackPhase::Entering);
            let leaving = out.iter().filter(|pl| pl.phase == StackPhase::Leaving);
            assert_eq!(entering.count(), 1, "progress {p}");
            assert_eq!(leaving.count(), 1, "progress {p}");
        }
    }
}

#[test]
fn depth_drives_rotation_and_blur() {
    let cfg = StackConfig {
        rotation_amount: 2.0,
        blur_amount: 3.0,
        ..StackConfig::default()
    };
    let out = layout_count(3, Progress::ONE, &cfg);
    assert_eq!(out[0].rotation, 4.0);
    assert_eq!(out[0].blur, 6.0);
    assert_eq!(out[2].rotation, 0.0);
    assert_eq!(out[2].blur, 0.0);
}

#[test]
fn windows_partition_progress() {
    assert_eq!(window(0, 4), (0.0, 0.25));
    assert_eq!(window(3, 4), (0.75, 1.0));
    assert_eq!(window(0, 0), (0.0, 0.0));
}

#[test]
fn config_validation() {
    assert!(StackConfig::default().validate().is_ok());
    for bad in [
        StackConfig {
            base_scale: 1.0,
            ..StackConfig::default()
        },
        StackConfig {
            item_scale: 0.0,
            ..StackConfig::default()
        },
        StackConfig {
            handoff: 1.5,
            ..StackConfig::default()
        },
        StackConfig {
            stack_distance: f64::NAN,
            ..StackConfig::default()
        },
    ] {
        assert!(bad.validate().is_err(), "{bad:?}");
    }
}
