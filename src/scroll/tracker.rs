use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::{
    animation::mapping::Mapping,
    animation::spring::{Spring, SpringConfig},
    foundation::core::{Axis, ElementId, NodeId, Progress, ScrollMetrics},
    foundation::error::{ScrollfxError, ScrollfxResult},
    render::target::{MappedOutput, Property, RenderTarget},
    scroll::host::ScrollHost,
    scroll::range::{ResolvedRange, ScrollRange},
    scroll::reveal::{RevealConfig, RevealEvent, RevealState, visible_fraction},
    stack::controller::{StackConfig, StackPlacement, layout_count},
};

/// Options controlling [`ScrollTracker`] frame behavior.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrackerOpts {
    /// Rewrite outputs even when their value did not change since the last frame.
    pub write_unchanged: bool,
    /// Upper bound on the frame delta fed to springs (tab switches, debugger pauses).
    pub max_dt_secs: f64,
}

impl Default for TrackerOpts {
    fn default() -> Self {
        Self {
            write_unchanged: false,
            max_dt_secs: 0.1,
        }
    }
}

impl TrackerOpts {
    /// Validate option ranges.
    pub fn validate(&self) -> ScrollfxResult<()> {
        if !self.max_dt_secs.is_finite() || self.max_dt_secs <= 0.0 {
            return Err(ScrollfxError::configuration(
                "tracker max_dt_secs must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Handle to a mounted [`ScrollRange`]. Stale after [`ScrollTracker::untrack`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId {
    index: u32,
    generation: u32,
}

/// Handle to one output binding on a track.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize,
)]
#[serde(transparent)]
pub struct BindingId(u64);

/// Handle to one reveal watch.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize,
)]
#[serde(transparent)]
pub struct WatchId(u64);

/// Read handle to the latest progress published for one track.
///
/// The value changes only inside [`ScrollTracker::frame`]; after the track is
/// untracked the handle keeps its last value and reports `is_live() == false`.
#[derive(Clone, Debug)]
pub struct ProgressSource {
    inner: Rc<SourceCell>,
}

#[derive(Debug)]
struct SourceCell {
    progress: Cell<Progress>,
    live: Cell<bool>,
}

impl ProgressSource {
    fn new() -> Self {
        Self {
            inner: Rc::new(SourceCell {
                progress: Cell::new(Progress::ZERO),
                live: Cell::new(true),
            }),
        }
    }

    /// Latest published progress.
    pub fn get(&self) -> Progress {
        self.inner.progress.get()
    }

    /// False once the originating track was untracked.
    pub fn is_live(&self) -> bool {
        self.inner.live.get()
    }
}

/// What one [`ScrollTracker::frame`] call did.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameReport {
    /// Monotonic frame counter.
    pub frame: u64,
    /// Whether anything was recomputed; `false` for idle frames.
    pub recomputed: bool,
    /// Scroll/resize notifications folded into this recomputation.
    pub coalesced: u32,
    /// Tracks whose progress changed.
    pub tracks_updated: usize,
    /// Render target writes issued.
    pub writes: usize,
    /// Tracks whose reference element could not be measured.
    pub unattached: usize,
    /// Reveal transitions, ordered by watch id.
    pub reveals: Vec<(WatchId, RevealEvent)>,
}

enum Binding {
    Output {
        node: NodeId,
        property: Property,
        mapping: Mapping,
        spring: Option<Spring>,
        last: Option<f64>,
    },
    Stack {
        nodes: Vec<NodeId>,
        config: StackConfig,
        last: Vec<Option<StackPlacement>>,
    },
}

struct TrackState {
    range: ScrollRange,
    resolved: Option<ResolvedRange>,
    progress: Progress,
    source: ProgressSource,
    bindings: Vec<(BindingId, Binding)>,
}

struct Slot {
    generation: u32,
    track: Option<TrackState>,
}

struct Watch {
    element: ElementId,
    axis: Axis,
    state: RevealState,
}

/// Owns mounted scroll ranges and the outputs bound to them.
///
/// The host calls [`ScrollTracker::notify_scroll`] / [`ScrollTracker::notify_resize`]
/// from its event handlers and [`ScrollTracker::frame`] once per displayed frame.
/// Events only mark the tracker dirty, so any number of them between two frames cost
/// a single recomputation. Within a frame every range is resolved and every progress
/// computed before the first output is written.
pub struct ScrollTracker {
    opts: TrackerOpts,
    slots: Vec<Slot>,
    free: Vec<u32>,
    watches: BTreeMap<WatchId, Watch>,
    next_binding: u64,
    next_watch: u64,
    frame: u64,
    pending: u32,
    dirty: bool,
    animating: bool,
    unattached: bool,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::with_opts_unchecked(TrackerOpts::default())
    }
}

impl ScrollTracker {
    /// Tracker with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker with explicit options.
    pub fn with_opts(opts: TrackerOpts) -> ScrollfxResult<Self> {
        opts.validate()?;
        Ok(Self::with_opts_unchecked(opts))
    }

    fn with_opts_unchecked(opts: TrackerOpts) -> Self {
        Self {
            opts,
            slots: Vec::new(),
            free: Vec::new(),
            watches: BTreeMap::new(),
            next_binding: 0,
            next_watch: 0,
            frame: 0,
            pending: 0,
            dirty: false,
            animating: false,
            unattached: false,
        }
    }

    /// Active options.
    pub fn opts(&self) -> &TrackerOpts {
        &self.opts
    }

    /// Mount a range. Its first measurement happens on the next frame.
    #[tracing::instrument(level = "debug", skip(self), fields(element = %range.element))]
    pub fn track(&mut self, range: ScrollRange) -> ScrollfxResult<TrackId> {
        range.validate()?;
        let track = TrackState {
            range,
            resolved: None,
            progress: Progress::ZERO,
            source: ProgressSource::new(),
            bindings: Vec::new(),
        };

        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.track = Some(track);
                TrackId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = u32::try_from(self.slots.len())
                    .map_err(|_| ScrollfxError::tracking("too many tracked ranges"))?;
                self.slots.push(Slot {
                    generation: 0,
                    track: Some(track),
                });
                TrackId {
                    index,
                    generation: 0,
                }
            }
        };
        self.dirty = true;
        Ok(id)
    }

    /// Unmount a range and drop every binding on it.
    ///
    /// Takes effect immediately: a recomputation already scheduled for the next frame
    /// never reaches this track's outputs.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn untrack(&mut self, id: TrackId) -> ScrollfxResult<()> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation && s.track.is_some())
            .ok_or_else(|| stale(id))?;
        if let Some(track) = slot.track.take() {
            track.source.inner.live.set(false);
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Ok(())
    }

    /// Number of mounted ranges.
    pub fn track_count(&self) -> usize {
        self.slots.iter().filter(|s| s.track.is_some()).count()
    }

    /// Bind `mapping` of the track's progress to `property` of `node`, optionally
    /// smoothed by a spring.
    pub fn bind(
        &mut self,
        track: TrackId,
        node: NodeId,
        property: Property,
        mapping: Mapping,
        spring: Option<SpringConfig>,
    ) -> ScrollfxResult<BindingId> {
        let spring = spring.map(Spring::new).transpose()?;
        let binding = Binding::Output {
            node,
            property,
            mapping,
            spring,
            last: None,
        };
        self.push_binding(track, binding)
    }

    /// Lay out `nodes` as a card stack driven by the track's progress.
    pub fn bind_stack(
        &mut self,
        track: TrackId,
        nodes: impl IntoIterator<Item = NodeId>,
        config: StackConfig,
    ) -> ScrollfxResult<BindingId> {
        config.validate()?;
        let nodes: Vec<NodeId> = nodes.into_iter().collect();
        let last = vec![None; nodes.len()];
        self.push_binding(
            track,
            Binding::Stack {
                nodes,
                config,
                last,
            },
        )
    }

    fn push_binding(&mut self, track: TrackId, binding: Binding) -> ScrollfxResult<BindingId> {
        let id = BindingId(self.next_binding);
        self.track_mut(track)?.bindings.push((id, binding));
        self.next_binding += 1;
        self.dirty = true;
        Ok(id)
    }

    /// Remove one binding. Its node keeps whatever was last written.
    pub fn unbind(&mut self, id: BindingId) -> ScrollfxResult<()> {
        for track in self.slots.iter_mut().filter_map(|s| s.track.as_mut()) {
            if let Some(pos) = track.bindings.iter().position(|(b, _)| *b == id) {
                track.bindings.remove(pos);
                return Ok(());
            }
        }
        Err(ScrollfxError::tracking(format!("unknown binding {}", id.0)))
    }

    /// Progress published by the last frame (0 before the first measurement).
    pub fn progress(&self, id: TrackId) -> ScrollfxResult<Progress> {
        Ok(self.track_ref(id)?.progress)
    }

    /// Range resolved by the last frame, `None` while unmeasured or unattached.
    pub fn resolved(&self, id: TrackId) -> ScrollfxResult<Option<ResolvedRange>> {
        Ok(self.track_ref(id)?.resolved)
    }

    /// Latest-value handle for the track's progress.
    pub fn source(&self, id: TrackId) -> ScrollfxResult<ProgressSource> {
        Ok(self.track_ref(id)?.source.clone())
    }

    /// Watch `element` entering and leaving the vertical viewport.
    pub fn watch(
        &mut self,
        element: impl Into<String>,
        config: RevealConfig,
    ) -> ScrollfxResult<WatchId> {
        self.watch_along(element, Axis::Y, config)
    }

    /// Like [`ScrollTracker::watch`] along an explicit axis.
    pub fn watch_along(
        &mut self,
        element: impl Into<String>,
        axis: Axis,
        config: RevealConfig,
    ) -> ScrollfxResult<WatchId> {
        let state = RevealState::new(config)?;
        let id = WatchId(self.next_watch);
        self.next_watch += 1;
        self.watches.insert(
            id,
            Watch {
                element: ElementId::new(element),
                axis,
                state,
            },
        );
        self.dirty = true;
        Ok(id)
    }

    /// Stop watching.
    pub fn unwatch(&mut self, id: WatchId) -> ScrollfxResult<()> {
        self.watches
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ScrollfxError::tracking(format!("unknown watch {}", id.0)))
    }

    /// Whether the watched element currently counts as visible.
    pub fn is_revealed(&self, id: WatchId) -> ScrollfxResult<bool> {
        self.watches
            .get(&id)
            .map(|w| w.state.is_visible())
            .ok_or_else(|| ScrollfxError::tracking(format!("unknown watch {}", id.0)))
    }

    /// Record a scroll event. Cheap; work is deferred to the next frame.
    pub fn notify_scroll(&mut self) {
        self.pending = self.pending.saturating_add(1);
        self.dirty = true;
    }

    /// Record a viewport or layout change. Ranges are re-measured on the next frame.
    pub fn notify_resize(&mut self) {
        tracing::trace!("resize scheduled re-measure");
        self.pending = self.pending.saturating_add(1);
        self.dirty = true;
    }

    /// True while the host should keep requesting frames: events are pending, a
    /// spring is still moving, or a reference element has yet to attach.
    pub fn needs_frame(&self) -> bool {
        self.dirty || self.animating || self.unattached
    }

    /// Run one frame: re-measure, recompute progress, and write changed outputs.
    #[tracing::instrument(level = "trace", skip(self, host, target))]
    pub fn frame(
        &mut self,
        host: &(impl ScrollHost + ?Sized),
        dt_secs: f64,
        target: &mut (impl RenderTarget + ?Sized),
    ) -> ScrollfxResult<FrameReport> {
        if !dt_secs.is_finite() {
            return Err(ScrollfxError::tracking("frame dt must be finite"));
        }
        self.frame += 1;
        let mut report = FrameReport {
            frame: self.frame,
            ..FrameReport::default()
        };
        if !self.needs_frame() {
            return Ok(report);
        }

        report.recomputed = true;
        report.coalesced = std::mem::take(&mut self.pending);
        self.dirty = false;
        let dt = dt_secs.clamp(0.0, self.opts.max_dt_secs);

        // Phase 1: one metrics readout, every range resolved before any write.
        let metrics = host.metrics();
        for track in self.slots.iter_mut().filter_map(|s| s.track.as_mut()) {
            let (resolved, progress) = measure(track, host, metrics)?;
            if resolved.is_none() {
                report.unattached += 1;
            }
            if progress != track.progress {
                report.tracks_updated += 1;
            }
            track.resolved = resolved;
            track.progress = progress;
            track.source.inner.progress.set(progress);
        }
        self.unattached = report.unattached > 0;

        // Phase 2: outputs.
        let write_unchanged = self.opts.write_unchanged;
        let mut animating = false;
        for track in self.slots.iter_mut().filter_map(|s| s.track.as_mut()) {
            let progress = track.progress;
            for (_, binding) in &mut track.bindings {
                report.writes += apply_binding(
                    binding,
                    progress,
                    dt,
                    write_unchanged,
                    &mut animating,
                    &mut *target,
                );
            }
        }
        self.animating = animating;

        // Phase 3: reveals.
        for (id, watch) in &mut self.watches {
            if watch.state.is_spent() {
                continue;
            }
            let fraction = host
                .measure(&watch.element)
                .map(|b| visible_fraction(b, metrics, watch.axis, watch.state.config().margin_px))
                .unwrap_or(0.0);
            if let Some(event) = watch.state.update(fraction) {
                tracing::debug!(element = %watch.element, ?event, "reveal");
                report.reveals.push((*id, event));
            }
        }

        Ok(report)
    }

    fn track_ref(&self, id: TrackId) -> ScrollfxResult<&TrackState> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.track.as_ref())
            .ok_or_else(|| stale(id))
    }

    fn track_mut(&mut self, id: TrackId) -> ScrollfxResult<&mut TrackState> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.track.as_mut())
            .ok_or_else(|| stale(id))
    }
}

fn stale(id: TrackId) -> ScrollfxError {
    ScrollfxError::tracking(format!(
        "track {}#{} is not mounted",
        id.index, id.generation
    ))
}

fn measure(
    track: &TrackState,
    host: &(impl ScrollHost + ?Sized),
    metrics: ScrollMetrics,
) -> ScrollfxResult<(Option<ResolvedRange>, Progress)> {
    match track.range.resolve_with(host, metrics) {
        Ok(resolved) => {
            if resolved.is_degenerate() {
                tracing::debug!(
                    element = %track.range.element,
                    at_px = resolved.start_px,
                    "degenerate scroll range; progress is a step"
                );
            }
            let scroll = track.range.axis.of_vec(metrics.offset);
            Ok((Some(resolved), resolved.progress_at(scroll)))
        }
        Err(ScrollfxError::Unattached(msg)) => {
            tracing::debug!(element = %track.range.element, %msg, "reference unattached; progress 0");
            Ok((None, Progress::ZERO))
        }
        Err(e) => Err(e),
    }
}

fn apply_binding(
    binding: &mut Binding,
    progress: Progress,
    dt: f64,
    write_unchanged: bool,
    animating: &mut bool,
    target: &mut (impl RenderTarget + ?Sized),
) -> usize {
    match binding {
        Binding::Output {
            node,
            property,
            mapping,
            spring,
            last,
        } => {
            let mapped = mapping.sample(progress.get());
            let value = match spring {
                Some(s) => {
                    let v = s.step(mapped, dt);
                    *animating |= !s.is_settled();
                    v
                }
                None => mapped,
            };
            if !write_unchanged && *last == Some(value) {
                return 0;
            }
            *last = Some(value);
            target.write(node, MappedOutput::new(*property, value));
            1
        }
        Binding::Stack {
            nodes,
            config,
            last,
        } => {
            let placements = layout_count(nodes.len(), progress, config);
            let mut writes = 0;
            for ((node, placement), prev) in nodes.iter().zip(placements).zip(last.iter_mut()) {
                if !write_unchanged && *prev == Some(placement) {
                    continue;
                }
                *prev = Some(placement);
                for output in placement.outputs() {
                    target.write(node, output);
                    writes += 1;
                }
                target.set_pinned(node, placement.pinned);
            }
            writes
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/tracker.rs"]
mod tests;
