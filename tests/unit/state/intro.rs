use super::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn phases_follow_the_default_timeline() {
    let seq = IntroSequence::new(IntroTimings::default()).unwrap();
    assert_eq!(seq.phase_at(ms(0)), IntroPhase::Tightening);
    assert_eq!(seq.phase_at(ms(2499)), IntroPhase::Tightening);
    assert_eq!(seq.phase_at(ms(2500)), IntroPhase::Reveal);
    assert_eq!(seq.phase_at(ms(4500)), IntroPhase::Exiting);
    assert_eq!(seq.phase_at(ms(4999)), IntroPhase::Exiting);
    assert_eq!(seq.phase_at(ms(5000)), IntroPhase::Done);
    assert_eq!(seq.total(), ms(5000));
}

#[test]
fn seen_intro_is_skipped() {
    let state = UiState {
        intro_seen: true,
        ..UiState::default()
    };
    let seq = IntroSequence::for_state(&state, IntroTimings::default()).unwrap();
    assert!(seq.is_skipped());
    assert_eq!(seq.phase_at(ms(0)), IntroPhase::Done);
    assert_eq!(seq.total(), Duration::ZERO);
}

#[test]
fn unordered_timings_are_rejected() {
    let t = IntroTimings {
        reveal_at_ms: 5000,
        ..IntroTimings::default()
    };
    assert!(IntroSequence::new(t).is_err());
}

#[test]
fn oversized_exit_saturates_instead_of_overflowing() {
    let t = IntroTimings {
        exit_ms: u64::MAX,
        ..IntroTimings::default()
    };
    let seq = IntroSequence::new(t).unwrap();
    assert_eq!(t.done_at_ms(), u64::MAX);
    assert_eq!(seq.total(), ms(u64::MAX));
    assert_eq!(seq.phase_at(ms(1_000_000)), IntroPhase::Exiting);
}
