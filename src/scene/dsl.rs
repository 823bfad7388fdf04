use std::collections::BTreeMap;

use crate::{
    animation::mapping::Mapping,
    animation::spring::SpringConfig,
    foundation::core::{Axis, ElementId, NodeId, Rect, Size},
    foundation::error::{ScrollfxError, ScrollfxResult},
    render::target::Property,
    scene::model::{BindingSpec, RevealSpec, Scene, StackSpec, TrackSpec},
    scroll::edge::Edge,
    scroll::reveal::RevealConfig,
    stack::controller::StackConfig,
};

/// Code-side construction of a [`Scene`].
pub struct SceneBuilder {
    viewport: Size,
    axis: Axis,
    elements: BTreeMap<ElementId, Rect>,
    tracks: Vec<TrackSpec>,
    reveals: Vec<RevealSpec>,
}

impl SceneBuilder {
    /// Start an empty vertical scene.
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            axis: Axis::Y,
            elements: BTreeMap::new(),
            tracks: Vec::new(),
            reveals: Vec::new(),
        }
    }

    /// Scroll axis for every track.
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Lay out an element. Ids must be unique.
    pub fn element(mut self, id: impl Into<String>, bounds: Rect) -> ScrollfxResult<Self> {
        let id = ElementId::new(id);
        if self.elements.contains_key(&id) {
            return Err(ScrollfxError::configuration(format!(
                "duplicate element id '{id}'"
            )));
        }
        self.elements.insert(id, bounds);
        Ok(self)
    }

    /// Add a track.
    pub fn track(mut self, track: TrackSpec) -> Self {
        self.tracks.push(track);
        self
    }

    /// Watch an element entering the viewport.
    pub fn reveal(mut self, element: impl Into<String>, config: RevealConfig) -> Self {
        self.reveals.push(RevealSpec {
            element: ElementId::new(element),
            config,
        });
        self
    }

    /// Assemble and validate.
    pub fn build(self) -> ScrollfxResult<Scene> {
        let scene = Scene {
            viewport: self.viewport,
            axis: self.axis,
            elements: self.elements,
            tracks: self.tracks,
            reveals: self.reveals,
        };
        scene.validate()?;
        Ok(scene)
    }
}

/// Code-side construction of a [`TrackSpec`].
pub struct TrackBuilder {
    id: String,
    element: ElementId,
    start: Edge,
    end: Edge,
    bindings: Vec<BindingSpec>,
    stacks: Vec<StackSpec>,
}

impl TrackBuilder {
    /// Track `element` from entering to leaving the viewport.
    pub fn new(id: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            element: ElementId::new(element),
            start: Edge::ENTER,
            end: Edge::EXIT,
            bindings: Vec::new(),
            stacks: Vec::new(),
        }
    }

    /// Explicit edges.
    pub fn edges(mut self, start: Edge, end: Edge) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Track from element start at viewport start to element end at viewport end.
    pub fn pinned(self) -> Self {
        self.edges(Edge::START_START, Edge::END_END)
    }

    /// Bind a mapped output.
    pub fn bind(mut self, node: impl Into<String>, property: Property, mapping: Mapping) -> Self {
        self.bindings.push(BindingSpec {
            node: NodeId::new(node),
            property,
            mapping,
            spring: None,
        });
        self
    }

    /// Bind a spring-smoothed output.
    pub fn bind_spring(
        mut self,
        node: impl Into<String>,
        property: Property,
        mapping: Mapping,
        spring: SpringConfig,
    ) -> Self {
        self.bindings.push(BindingSpec {
            node: NodeId::new(node),
            property,
            mapping,
            spring: Some(spring),
        });
        self
    }

    /// Drive a card stack over `nodes`.
    pub fn stack<I, S>(mut self, nodes: I, config: StackConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stacks.push(StackSpec {
            nodes: nodes.into_iter().map(NodeId::new).collect(),
            config,
        });
        self
    }

    /// Finish the track. Cross-references are checked by [`SceneBuilder::build`].
    pub fn build(self) -> ScrollfxResult<TrackSpec> {
        if self.id.trim().is_empty() {
            return Err(ScrollfxError::configuration("track id must be non-empty"));
        }
        Ok(TrackSpec {
            id: self.id,
            element: self.element,
            start: self.start,
            end: self.end,
            bindings: self.bindings,
            stacks: self.stacks,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/dsl.rs"]
mod tests;
