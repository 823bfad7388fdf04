//! scrollfx turns scroll position into animation state.
//!
//! A host view layer drives the engine once per displayed frame:
//!
//! - Describe what moves with a [`ScrollRange`] and [`Mapping`]s (or a whole [`Scene`])
//! - Mount them on a [`ScrollTracker`]
//! - Forward scroll/resize events, then call [`ScrollTracker::frame`] with a
//!   [`ScrollHost`] and a [`RenderTarget`]
//!
//! Progress is computed once per frame per range and every bound output is a pure
//! function of it, so all properties driven by one range stay mutually consistent.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod scroll;
pub(crate) mod stack;
pub(crate) mod state;

pub use crate::foundation::core::{
    Affine, Axis, ElementBox, ElementId, NodeId, Progress, Rect, ScrollMetrics, Size, Vec2,
};
pub use crate::foundation::error::{ScrollfxError, ScrollfxResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::mapping::{Breakpoint, Mapping, evaluate};
pub use crate::animation::ops::{fade_window, mirror, stagger};
pub use crate::animation::spring::{Spring, SpringConfig};
pub use crate::render::presentation::Presentation;
pub use crate::render::target::{MappedOutput, Property, RecordingTarget, RenderTarget};
pub use crate::scene::dsl::{SceneBuilder, TrackBuilder};
pub use crate::scene::model::{BindingSpec, RevealSpec, Scene, StackSpec, TrackSpec};
pub use crate::scene::session::SceneSession;
pub use crate::scroll::edge::{Anchor, Edge};
pub use crate::scroll::host::{ScrollHost, SimulatedHost};
pub use crate::scroll::range::{ResolvedRange, ScrollRange};
pub use crate::scroll::reveal::{RevealConfig, RevealEvent, RevealState, visible_fraction};
pub use crate::scroll::tracker::{
    BindingId, FrameReport, ProgressSource, ScrollTracker, TrackId, TrackerOpts, WatchId,
};
pub use crate::stack::controller::{
    StackConfig, StackItem, StackPhase, StackPlacement, layout, layout_count, window,
};
pub use crate::state::intro::{IntroPhase, IntroSequence, IntroTimings};
pub use crate::state::ui::{
    INTRO_SEEN_KEY, MemoryStore, StateStore, THEME_KEY, Theme, UiChange, UiState, UiStore,
};
