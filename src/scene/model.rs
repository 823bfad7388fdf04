use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::{
    animation::mapping::Mapping,
    animation::spring::SpringConfig,
    foundation::core::{Axis, ElementId, NodeId, Rect, Size},
    foundation::error::{ScrollfxError, ScrollfxResult},
    foundation::math::is_finite_all,
    render::target::Property,
    scroll::edge::Edge,
    scroll::range::ScrollRange,
    scroll::reveal::RevealConfig,
    stack::controller::{StackConfig, StackPlacement},
};

/// A page of scroll-driven animation: layout of measured elements plus every
/// tracked range and the outputs bound to it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Viewport size of the scroll container.
    pub viewport: Size,
    /// Scroll axis for every track and reveal.
    #[serde(default)]
    pub axis: Axis,
    /// Element bounds in scroll-content coordinates.
    pub elements: BTreeMap<ElementId, Rect>,
    /// Tracked ranges, mounted in order.
    #[serde(default)]
    pub tracks: Vec<TrackSpec>,
    /// Viewport-entry triggers.
    #[serde(default)]
    pub reveals: Vec<RevealSpec>,
}

/// One tracked range and its bound outputs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackSpec {
    /// Scene-unique name.
    pub id: String,
    /// Reference element.
    pub element: ElementId,
    /// Edge mapping to progress 0.
    #[serde(default = "default_start")]
    pub start: Edge,
    /// Edge mapping to progress 1.
    #[serde(default = "default_end")]
    pub end: Edge,
    /// Mapped outputs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<BindingSpec>,
    /// Card stacks driven by this track.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stacks: Vec<StackSpec>,
}

fn default_start() -> Edge {
    Edge::ENTER
}

fn default_end() -> Edge {
    Edge::EXIT
}

/// Mapping of a track's progress onto one property of one node.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BindingSpec {
    /// Receiving node.
    pub node: NodeId,
    /// Driven property.
    pub property: Property,
    /// Progress to value mapping.
    pub mapping: Mapping,
    /// Optional spring smoothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spring: Option<SpringConfig>,
}

/// Stacked-cards layout over a list of nodes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StackSpec {
    /// Nodes in stack order.
    pub nodes: Vec<NodeId>,
    /// Layout parameters.
    #[serde(default)]
    pub config: StackConfig,
}

/// Watch an element entering the viewport.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealSpec {
    /// Watched element.
    pub element: ElementId,
    /// Trigger parameters.
    #[serde(default)]
    pub config: RevealConfig,
}

impl TrackSpec {
    /// Scroll range described by this track along `axis`.
    pub fn range(&self, axis: Axis) -> ScrollRange {
        ScrollRange {
            element: self.element.clone(),
            start: self.start,
            end: self.end,
            axis,
        }
    }
}

impl Scene {
    /// Read, parse and validate a JSON scene file.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollfxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollfxError::configuration(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse and validate a JSON scene from a reader.
    pub fn from_reader(r: impl Read) -> ScrollfxResult<Self> {
        let scene: Self = serde_json::from_reader(r)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Parse and validate a JSON scene document.
    pub fn from_json(json: &str) -> ScrollfxResult<Self> {
        let scene: Self = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> ScrollfxResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a track by id.
    pub fn track(&self, id: &str) -> Option<&TrackSpec> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Check structural and numeric consistency of the whole scene.
    pub fn validate(&self) -> ScrollfxResult<()> {
        let Size { width, height } = self.viewport;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ScrollfxError::configuration(
                "viewport width/height must be finite and > 0",
            ));
        }

        for (id, rect) in &self.elements {
            if id.as_str().trim().is_empty() {
                return Err(ScrollfxError::configuration("element id must be non-empty"));
            }
            let finite = is_finite_all(&[rect.x0, rect.y0, rect.x1, rect.y1]);
            if !finite || rect.width() < 0.0 || rect.height() < 0.0 {
                return Err(ScrollfxError::configuration(format!(
                    "element '{id}' has invalid bounds"
                )));
            }
        }

        let mut track_ids = BTreeSet::new();
        let mut bound = HashSet::new();
        for track in &self.tracks {
            if track.id.trim().is_empty() {
                return Err(ScrollfxError::configuration("track id must be non-empty"));
            }
            if !track_ids.insert(track.id.as_str()) {
                return Err(ScrollfxError::configuration(format!(
                    "duplicate track id '{}'",
                    track.id
                )));
            }
            self.require_element(&track.element, || format!("track '{}'", track.id))?;
            track.range(self.axis).validate()?;

            for binding in &track.bindings {
                if binding.node.as_str().trim().is_empty() {
                    return Err(ScrollfxError::configuration(format!(
                        "track '{}' has a binding with an empty node id",
                        track.id
                    )));
                }
                if let Some(spring) = &binding.spring {
                    spring.validate()?;
                }
                if !bound.insert((binding.node.clone(), binding.property)) {
                    return Err(ScrollfxError::configuration(format!(
                        "node '{}' has {:?} bound more than once",
                        binding.node, binding.property
                    )));
                }
            }

            for stack in &track.stacks {
                stack.config.validate()?;
                let mut seen = BTreeSet::new();
                for node in &stack.nodes {
                    if !seen.insert(node) {
                        return Err(ScrollfxError::configuration(format!(
                            "track '{}' stacks node '{node}' twice",
                            track.id
                        )));
                    }
                    for property in StackPlacement::PROPERTIES {
                        if !bound.insert((node.clone(), property)) {
                            return Err(ScrollfxError::configuration(format!(
                                "node '{node}' has {property:?} bound more than once"
                            )));
                        }
                    }
                }
            }
        }

        for reveal in &self.reveals {
            self.require_element(&reveal.element, || "reveal".to_string())?;
            reveal.config.validate()?;
        }

        Ok(())
    }

    fn require_element(
        &self,
        element: &ElementId,
        owner: impl FnOnce() -> String,
    ) -> ScrollfxResult<()> {
        if self.elements.contains_key(element) {
            return Ok(());
        }
        Err(ScrollfxError::configuration(format!(
            "{} references missing element '{element}'",
            owner()
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
