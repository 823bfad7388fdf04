use std::collections::HashMap;

use crate::foundation::core::{ElementBox, ElementId, ScrollMetrics, Size, Vec2};

/// Read-only view of the scroll container hosting tracked elements (window or a
/// designated scrollable container).
///
/// The engine never moves the scroll position; only user or programmatic scrolling
/// outside the engine changes it.
pub trait ScrollHost {
    /// Current scroll offset and viewport size.
    fn metrics(&self) -> ScrollMetrics;
    /// Bounds of `element` in scroll-content coordinates, or `None` when not attached.
    fn measure(&self, element: &ElementId) -> Option<ElementBox>;
}

/// In-memory host with explicit scroll offset, viewport, and element layout.
#[derive(Clone, Debug)]
pub struct SimulatedHost {
    offset: Vec2,
    viewport: Size,
    elements: HashMap<ElementId, ElementBox>,
}

impl SimulatedHost {
    /// Host with the given viewport, scrolled to the origin, with no elements.
    pub fn new(viewport: Size) -> Self {
        Self {
            offset: Vec2::ZERO,
            viewport,
            elements: HashMap::new(),
        }
    }

    /// Scroll vertically to `y`.
    pub fn scroll_to(&mut self, y: f64) {
        self.offset.y = y;
    }

    /// Scroll to an arbitrary offset.
    pub fn scroll_to_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    /// Change the viewport size.
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Attach (or move) an element.
    pub fn attach(&mut self, element: impl Into<String>, bounds: ElementBox) {
        self.elements.insert(ElementId::new(element), bounds);
    }

    /// Detach an element; later measurements report it as unattached.
    pub fn detach(&mut self, element: &str) -> Option<ElementBox> {
        self.elements.remove(&ElementId::new(element))
    }
}

impl ScrollHost for SimulatedHost {
    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            offset: self.offset,
            viewport: self.viewport,
        }
    }

    fn measure(&self, element: &ElementId) -> Option<ElementBox> {
        self.elements.get(element).copied()
    }
}
