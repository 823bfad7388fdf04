use std::collections::BTreeMap;

use crate::{foundation::core::NodeId, render::presentation::Presentation};

/// Presentational property a mapped output drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Uniform scale.
    Scale,
    /// Horizontal scale.
    ScaleX,
    /// Vertical scale.
    ScaleY,
    /// Horizontal translation in px.
    TranslateX,
    /// Vertical translation in px.
    TranslateY,
    /// Rotation in degrees.
    Rotate,
    /// Blur radius in px.
    Blur,
    /// Stacking order.
    ZIndex,
    /// Fill fraction in `[0, 1]` (progress lines, bars).
    Extent,
}

/// A property value derived from the current progress. Has no identity of its own.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MappedOutput {
    /// Driven property.
    pub property: Property,
    /// Value to apply.
    pub value: f64,
}

impl MappedOutput {
    /// Pair a property with a value.
    pub fn new(property: Property, value: f64) -> Self {
        Self { property, value }
    }
}

/// Host hook for imperatively setting presentational state on a mounted node.
///
/// Writes bypass any structural re-render; the tracker calls these from inside
/// [`crate::ScrollTracker::frame`] only.
pub trait RenderTarget {
    /// Apply one output to `node`.
    fn write(&mut self, node: &NodeId, output: MappedOutput);
    /// Fix or release `node` at its pinned screen position.
    fn set_pinned(&mut self, node: &NodeId, pinned: bool);
}

/// In-memory render target for tests, the CLI, and debugging.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    nodes: BTreeMap<NodeId, Presentation>,
    log: Vec<(NodeId, MappedOutput)>,
}

impl RecordingTarget {
    /// Create an empty target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated presentation of `node`, if it was ever written.
    pub fn presentation(&self, node: &NodeId) -> Option<&Presentation> {
        self.nodes.get(node)
    }

    /// Shorthand for reading one property of a node.
    pub fn value(&self, node: &str, property: Property) -> Option<f64> {
        self.nodes
            .get(&NodeId::new(node))
            .map(|p| p.get(property))
    }

    /// All node presentations, ordered by id.
    pub fn nodes(&self) -> &BTreeMap<NodeId, Presentation> {
        &self.nodes
    }

    /// Every write in order.
    pub fn log(&self) -> &[(NodeId, MappedOutput)] {
        &self.log
    }

    /// Number of writes addressed to `node`.
    pub fn writes_for(&self, node: &str) -> usize {
        self.log.iter().filter(|(n, _)| n.as_str() == node).count()
    }

    /// Forget the write log, keeping presentations.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

impl RenderTarget for RecordingTarget {
    fn write(&mut self, node: &NodeId, output: MappedOutput) {
        self.nodes.entry(node.clone()).or_default().apply(output);
        self.log.push((node.clone(), output));
    }

    fn set_pinned(&mut self, node: &NodeId, pinned: bool) {
        self.nodes.entry(node.clone()).or_default().pinned = pinned;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/target.rs"]
mod tests;
