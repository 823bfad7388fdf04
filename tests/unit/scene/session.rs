use super::*;
use crate::animation::mapping::Mapping;
use crate::foundation::core::NodeId;
use crate::render::target::{Property, RecordingTarget};
use crate::scene::dsl::{SceneBuilder, TrackBuilder};
use crate::scroll::host::ScrollHost;
use crate::scroll::reveal::{RevealConfig, RevealEvent};
use crate::stack::controller::StackConfig;

const DT: f64 = 1.0 / 60.0;

fn landing(axis: Axis) -> Scene {
    let (hero, cards) = match axis {
        Axis::Y => (
            Rect::new(0.0, 0.0, 1280.0, 1800.0),
            Rect::new(0.0, 1800.0, 1280.0, 4800.0),
        ),
        Axis::X => (
            Rect::new(0.0, 0.0, 2280.0, 800.0),
            Rect::new(2280.0, 0.0, 5280.0, 800.0),
        ),
    };
    let hero_track = TrackBuilder::new("hero", "hero")
        .pinned()
        .bind(
            "title",
            Property::Scale,
            Mapping::from_pairs(&[0.0, 0.2, 0.4], &[1.0, 0.8, 0.5]).unwrap(),
        )
        .build()
        .unwrap();
    let cards_track = TrackBuilder::new("cards", "cards")
        .pinned()
        .stack(["c0", "c1", "c2"], StackConfig::default())
        .build()
        .unwrap();
    SceneBuilder::new(Size::new(1280.0, 800.0))
        .axis(axis)
        .element("hero", hero)
        .unwrap()
        .element("cards", cards)
        .unwrap()
        .track(hero_track)
        .track(cards_track)
        .reveal("cards", RevealConfig::default())
        .build()
        .unwrap()
}

#[test]
fn mounts_every_track() {
    let s = SceneSession::new(landing(Axis::Y), TrackerOpts::default()).unwrap();
    assert_eq!(s.track_names().collect::<Vec<_>>(), vec!["cards", "hero"]);
    assert_eq!(s.tracker().track_count(), 2);
    assert_eq!(s.host().metrics().viewport, Size::new(1280.0, 800.0));
}

#[test]
fn scrolling_drives_bindings_and_stacks() {
    let mut s = SceneSession::new(landing(Axis::Y), TrackerOpts::default()).unwrap();
    let mut out = RecordingTarget::new();
    s.step(DT, &mut out).unwrap();
    assert_eq!(out.value("title", Property::Scale), Some(1.0));

    // Hero span is 0..1000; cards span is 1800..4000.
    s.scroll_to(200.0);
    s.step(DT, &mut out).unwrap();
    assert_eq!(s.progress("hero").unwrap().get(), 0.2);
    assert_eq!(out.value("title", Property::Scale), Some(0.8));

    s.scroll_to(2900.0);
    let report = s.step(DT, &mut out).unwrap();
    assert_eq!(s.progress("cards").unwrap().get(), 0.5);
    assert!(out.presentation(&NodeId::new("c1")).unwrap().pinned);
    assert!(!out.presentation(&NodeId::new("c2")).unwrap().pinned);

    let (watch, event) = report.reveals[0];
    assert_eq!(event, RevealEvent::Enter);
    assert_eq!(s.watched_element(watch).unwrap().as_str(), "cards");
}

#[test]
fn horizontal_scene_scrolls_along_x() {
    let mut s = SceneSession::new(landing(Axis::X), TrackerOpts::default()).unwrap();
    let mut out = RecordingTarget::new();
    s.scroll_to(100.0);
    s.step(DT, &mut out).unwrap();
    assert_eq!(s.progress("hero").unwrap().get(), 0.1);
}

#[test]
fn unmount_stops_outputs() {
    let mut s = SceneSession::new(landing(Axis::Y), TrackerOpts::default()).unwrap();
    let mut out = RecordingTarget::new();
    s.step(DT, &mut out).unwrap();
    out.clear_log();

    s.scroll_to(300.0);
    s.unmount("hero").unwrap();
    s.step(DT, &mut out).unwrap();
    assert_eq!(out.writes_for("title"), 0);
    assert!(s.progress("hero").is_err());
    assert!(s.unmount("hero").is_err());
}

#[test]
fn detached_element_degrades_to_zero() {
    let mut s = SceneSession::new(landing(Axis::Y), TrackerOpts::default()).unwrap();
    let mut out = RecordingTarget::new();
    s.scroll_to(500.0);
    s.step(DT, &mut out).unwrap();
    assert_eq!(s.progress("hero").unwrap().get(), 0.5);

    s.detach("hero");
    let report = s.step(DT, &mut out).unwrap();
    assert_eq!(report.unattached, 1);
    assert_eq!(s.progress("hero").unwrap(), Progress::ZERO);

    s.relayout("hero", Rect::new(0.0, 0.0, 1280.0, 1800.0));
    s.step(DT, &mut out).unwrap();
    assert_eq!(s.progress("hero").unwrap().get(), 0.5);
}

#[test]
fn resize_changes_progress() {
    let mut s = SceneSession::new(landing(Axis::Y), TrackerOpts::default()).unwrap();
    let mut out = RecordingTarget::new();
    s.scroll_to(400.0);
    s.step(DT, &mut out).unwrap();
    s.resize(Size::new(1280.0, 1000.0));
    s.step(DT, &mut out).unwrap();
    assert_eq!(s.progress("hero").unwrap().get(), 0.5);
}
