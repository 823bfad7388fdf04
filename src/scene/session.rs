use std::collections::BTreeMap;

use crate::{
    foundation::core::{Axis, ElementId, Progress, Rect, Size, Vec2},
    foundation::error::{ScrollfxError, ScrollfxResult},
    render::target::RenderTarget,
    scene::model::Scene,
    scroll::host::SimulatedHost,
    scroll::tracker::{FrameReport, ScrollTracker, TrackId, TrackerOpts, WatchId},
};

/// A [`Scene`] mounted on a simulated scroll container.
///
/// The session owns the host and the tracker; callers drive it the way a browser
/// would: move the scroll position, then step one frame.
pub struct SceneSession {
    scene: Scene,
    host: SimulatedHost,
    tracker: ScrollTracker,
    tracks: BTreeMap<String, TrackId>,
    watches: BTreeMap<WatchId, ElementId>,
}

impl SceneSession {
    /// Validate `scene`, lay out its elements, and mount every track and reveal.
    #[tracing::instrument(level = "debug", skip(scene), fields(tracks = scene.tracks.len()))]
    pub fn new(scene: Scene, opts: TrackerOpts) -> ScrollfxResult<Self> {
        scene.validate()?;
        let mut host = SimulatedHost::new(scene.viewport);
        for (id, bounds) in &scene.elements {
            host.attach(id.as_str(), *bounds);
        }

        let mut tracker = ScrollTracker::with_opts(opts)?;
        let mut tracks = BTreeMap::new();
        for track in &scene.tracks {
            let id = tracker.track(track.range(scene.axis))?;
            for b in &track.bindings {
                tracker.bind(id, b.node.clone(), b.property, b.mapping.clone(), b.spring)?;
            }
            for s in &track.stacks {
                tracker.bind_stack(id, s.nodes.iter().cloned(), s.config)?;
            }
            tracks.insert(track.id.clone(), id);
        }

        let mut watches = BTreeMap::new();
        for r in &scene.reveals {
            let id = tracker.watch_along(r.element.as_str(), scene.axis, r.config)?;
            watches.insert(id, r.element.clone());
        }

        Ok(Self {
            scene,
            host,
            tracker,
            tracks,
            watches,
        })
    }

    /// Mounted scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Underlying tracker.
    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    /// Underlying host.
    pub fn host(&self) -> &SimulatedHost {
        &self.host
    }

    /// Scroll along the scene axis.
    pub fn scroll_to(&mut self, offset: f64) {
        let to = match self.scene.axis {
            Axis::Y => Vec2::new(0.0, offset),
            Axis::X => Vec2::new(offset, 0.0),
        };
        self.host.scroll_to_offset(to);
        self.tracker.notify_scroll();
    }

    /// Change the viewport size.
    pub fn resize(&mut self, viewport: Size) {
        self.host.resize(viewport);
        self.tracker.notify_resize();
    }

    /// Move (or attach) an element.
    pub fn relayout(&mut self, element: impl Into<String>, bounds: Rect) {
        self.host.attach(element, bounds);
        self.tracker.notify_resize();
    }

    /// Detach an element; tracks referencing it degrade to progress 0.
    pub fn detach(&mut self, element: &str) {
        self.host.detach(element);
        self.tracker.notify_resize();
    }

    /// Advance one frame.
    pub fn step(
        &mut self,
        dt_secs: f64,
        target: &mut (impl RenderTarget + ?Sized),
    ) -> ScrollfxResult<FrameReport> {
        self.tracker.frame(&self.host, dt_secs, target)
    }

    /// Latest progress of the named track.
    pub fn progress(&self, track: &str) -> ScrollfxResult<Progress> {
        self.tracker.progress(self.track_id(track)?)
    }

    /// Unmount the named track and all its outputs.
    pub fn unmount(&mut self, track: &str) -> ScrollfxResult<()> {
        let id = self.track_id(track)?;
        self.tracker.untrack(id)?;
        self.tracks.remove(track);
        Ok(())
    }

    /// Element watched by `id`.
    pub fn watched_element(&self, id: WatchId) -> Option<&ElementId> {
        self.watches.get(&id)
    }

    /// Ids of mounted tracks.
    pub fn track_names(&self) -> impl Iterator<Item = &str> {
        self.tracks.keys().map(String::as_str)
    }

    fn track_id(&self, track: &str) -> ScrollfxResult<TrackId> {
        self.tracks
            .get(track)
            .copied()
            .ok_or_else(|| ScrollfxError::tracking(format!("unknown track '{track}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/session.rs"]
mod tests;
