use crate::{
    foundation::core::Progress,
    foundation::error::{ScrollfxError, ScrollfxResult},
    foundation::math::{clamp01, lerp},
    render::target::{MappedOutput, Property},
};

/// Stacked-cards layout parameters.
///
/// All distances are in px along the scroll axis, measured from the top of the
/// viewport for pinned items.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Screen position of the first pinned item.
    pub stack_position: f64,
    /// Extra pin offset per item so stacked cards peek out below each other.
    pub stack_distance: f64,
    /// Spacing between upcoming (unpinned) items.
    pub item_distance: f64,
    /// Scale of upcoming items and floor for stacked items, in `(0, 1)`.
    pub base_scale: f64,
    /// Scale lost per level of depth once stacked behind.
    pub item_scale: f64,
    /// Width of the handoff ramp as a fraction of one item window, in `[0, 1]`.
    pub handoff: f64,
    /// Rotation in degrees added per level of depth.
    pub rotation_amount: f64,
    /// Blur in px added per level of depth.
    pub blur_amount: f64,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            stack_position: 0.0,
            stack_distance: 40.0,
            item_distance: 100.0,
            base_scale: 0.8,
            item_scale: 0.05,
            handoff: 0.25,
            rotation_amount: 0.0,
            blur_amount: 0.0,
        }
    }
}

impl StackConfig {
    /// Validate ranges of every field.
    pub fn validate(&self) -> ScrollfxResult<()> {
        let fields = [
            ("stack_position", self.stack_position),
            ("stack_distance", self.stack_distance),
            ("item_distance", self.item_distance),
            ("base_scale", self.base_scale),
            ("item_scale", self.item_scale),
            ("handoff", self.handoff),
            ("rotation_amount", self.rotation_amount),
            ("blur_amount", self.blur_amount),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ScrollfxError::configuration(format!(
                "stack {name} must be finite"
            )));
        }
        if !(self.base_scale > 0.0 && self.base_scale < 1.0) {
            return Err(ScrollfxError::configuration(
                "stack base_scale must be within (0, 1)",
            ));
        }
        if self.item_scale <= 0.0 {
            return Err(ScrollfxError::configuration("stack item_scale must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.handoff) {
            return Err(ScrollfxError::configuration(
                "stack handoff must be within [0, 1]",
            ));
        }
        if self.blur_amount < 0.0 {
            return Err(ScrollfxError::configuration("stack blur_amount must be >= 0"));
        }
        Ok(())
    }
}

/// A renderable unit at a fixed position in a stack.
#[derive(Clone, Debug, PartialEq)]
pub struct StackItem<T> {
    /// Position in the stack, `0` first.
    pub index: usize,
    /// Caller payload (node id, card data, ...).
    pub item: T,
}

impl<T> StackItem<T> {
    /// Number items in iteration order.
    pub fn sequence(items: impl IntoIterator<Item = T>) -> Vec<Self> {
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| Self { index, item })
            .collect()
    }
}

/// Where an item is in its upcoming -> active -> stacked-behind lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StackPhase {
    /// Below the pin point, waiting.
    Upcoming,
    /// Handoff in: scaling up toward the pin point.
    Entering,
    /// Pinned at full scale, topmost.
    Active,
    /// Handoff out: still pinned, starting to recede.
    Leaving,
    /// Pinned behind a later item at reduced scale.
    Stacked,
}

/// Computed layout of one stack item.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StackPlacement {
    /// Item index.
    pub index: usize,
    /// Lifecycle phase.
    pub phase: StackPhase,
    /// Offset along the scroll axis in px from the viewport start.
    pub offset: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Blur in px.
    pub blur: f64,
    /// Whether the item is fixed at its pin position.
    pub pinned: bool,
}

impl StackPlacement {
    /// Properties a placement drives on its node, in write order.
    pub const PROPERTIES: [Property; 5] = [
        Property::TranslateY,
        Property::Scale,
        Property::Rotate,
        Property::Blur,
        Property::ZIndex,
    ];

    /// Values for [`Self::PROPERTIES`].
    pub fn outputs(&self) -> [MappedOutput; 5] {
        [
            MappedOutput::new(Property::TranslateY, self.offset),
            MappedOutput::new(Property::Scale, self.scale),
            MappedOutput::new(Property::Rotate, self.rotation),
            MappedOutput::new(Property::Blur, self.blur),
            MappedOutput::new(Property::ZIndex, self.index as f64),
        ]
    }

    /// Pinned at full scale with no handoff in progress.
    pub fn is_fully_active(&self) -> bool {
        self.phase == StackPhase::Active
    }
}

/// Progress window `[start, end]` owned by item `index` of `count`.
pub fn window(index: usize, count: usize) -> (f64, f64) {
    if count == 0 {
        return (0.0, 0.0);
    }
    let n = count as f64;
    (index as f64 / n, (index + 1) as f64 / n)
}

/// Lay out `items` for the shared `progress`.
#[tracing::instrument(level = "trace", skip(items, config))]
pub fn layout<T>(
    items: &[StackItem<T>],
    progress: Progress,
    config: &StackConfig,
) -> Vec<StackPlacement> {
    let count = items.len();
    let cursor = stack_cursor(count, progress, config.handoff);
    items
        .iter()
        .map(|it| place(it.index, cursor, config))
        .collect()
}

/// [`layout`] for `count` anonymous items.
pub fn layout_count(count: usize, progress: Progress, config: &StackConfig) -> Vec<StackPlacement> {
    let cursor = stack_cursor(count, progress, config.handoff);
    (0..count).map(|i| place(i, cursor, config)).collect()
}

/// Continuous "which item is on top" position in `[0, count - 1]`.
///
/// Each boundary `k / count` contributes a ramp of width `handoff / count` that
/// finishes exactly at the boundary. With `handoff == 0` the ramp is a step and the
/// later item wins at the boundary itself.
pub(crate) fn stack_cursor(count: usize, progress: Progress, handoff: f64) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    let n = count as f64;
    let p = progress.get();
    let width = handoff / n;
    (1..count)
        .map(|k| {
            let boundary = k as f64 / n;
            if width <= 0.0 {
                if p >= boundary { 1.0 } else { 0.0 }
            } else {
                clamp01((p - (boundary - width)) / width)
            }
        })
        .sum()
}

fn place(index: usize, cursor: f64, config: &StackConfig) -> StackPlacement {
    let depth = cursor - index as f64;
    let pin = config.stack_position + index as f64 * config.stack_distance;
    let behind = depth.max(0.0);

    let (phase, offset, scale, pinned) = if depth <= -1.0 {
        (
            StackPhase::Upcoming,
            pin - depth * config.item_distance,
            config.base_scale,
            false,
        )
    } else if depth < 0.0 {
        (
            StackPhase::Entering,
            pin - depth * config.item_distance,
            lerp(config.base_scale, 1.0, 1.0 + depth),
            false,
        )
    } else {
        let phase = if depth == 0.0 {
            StackPhase::Active
        } else if depth < 1.0 {
            StackPhase::Leaving
        } else {
            StackPhase::Stacked
        };
        let scale = (1.0 - depth * config.item_scale).max(config.base_scale);
        (phase, pin, scale, true)
    };

    StackPlacement {
        index,
        phase,
        offset,
        scale,
        rotation: behind * config.rotation_amount,
        blur: behind * config.blur_amount,
        pinned,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stack/controller.rs"]
mod tests;
