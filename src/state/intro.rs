use std::time::Duration;

use crate::{
    foundation::error::{ScrollfxError, ScrollfxResult},
    state::ui::UiState,
};

/// Timeline of the first-visit intro animation, in milliseconds from mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IntroTimings {
    /// End of the tightening stage; the wordmark is revealed.
    pub reveal_at_ms: u64,
    /// End of the reveal stage; the overlay starts exiting.
    pub complete_at_ms: u64,
    /// Exit transition length.
    pub exit_ms: u64,
}

impl Default for IntroTimings {
    fn default() -> Self {
        Self {
            reveal_at_ms: 2500,
            complete_at_ms: 4500,
            exit_ms: 500,
        }
    }
}

impl IntroTimings {
    /// Stages must be ordered.
    pub fn validate(&self) -> ScrollfxResult<()> {
        if self.reveal_at_ms >= self.complete_at_ms {
            return Err(ScrollfxError::configuration(
                "intro reveal_at_ms must be < complete_at_ms",
            ));
        }
        Ok(())
    }

    /// Milliseconds from mount until the overlay is gone.
    pub fn done_at_ms(&self) -> u64 {
        self.complete_at_ms.saturating_add(self.exit_ms)
    }
}

/// Intro stage at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntroPhase {
    /// Letters drawing together.
    Tightening,
    /// Wordmark visible.
    Reveal,
    /// Overlay fading out.
    Exiting,
    /// Intro gone; the page is interactive.
    Done,
}

/// Pure timeline of the intro overlay.
#[derive(Clone, Copy, Debug)]
pub struct IntroSequence {
    timings: IntroTimings,
    skipped: bool,
}

impl IntroSequence {
    /// Sequence that plays in full.
    pub fn new(timings: IntroTimings) -> ScrollfxResult<Self> {
        timings.validate()?;
        Ok(Self {
            timings,
            skipped: false,
        })
    }

    /// Sequence for the given UI state; already `Done` when the intro was seen.
    pub fn for_state(state: &UiState, timings: IntroTimings) -> ScrollfxResult<Self> {
        let mut seq = Self::new(timings)?;
        seq.skipped = state.intro_seen;
        Ok(seq)
    }

    /// True when the intro will not play.
    pub fn is_skipped(&self) -> bool {
        self.skipped
    }

    /// Time from mount until [`IntroPhase::Done`].
    pub fn total(&self) -> Duration {
        if self.skipped {
            return Duration::ZERO;
        }
        Duration::from_millis(self.timings.done_at_ms())
    }

    /// Stage at `elapsed` since mount.
    pub fn phase_at(&self, elapsed: Duration) -> IntroPhase {
        if self.skipped {
            return IntroPhase::Done;
        }
        let ms = elapsed.as_millis();
        let t = &self.timings;
        if ms < u128::from(t.reveal_at_ms) {
            IntroPhase::Tightening
        } else if ms < u128::from(t.complete_at_ms) {
            IntroPhase::Reveal
        } else if ms < u128::from(t.done_at_ms()) {
            IntroPhase::Exiting
        } else {
            IntroPhase::Done
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/intro.rs"]
mod tests;
