use crate::{
    foundation::core::{Affine, Vec2},
    render::target::{MappedOutput, Property},
};

/// Accumulated presentational state of one node.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Presentation {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Translation in px.
    pub translate: Vec2,
    /// Per-axis scale.
    pub scale: Vec2,
    /// Rotation in degrees.
    pub rotation_deg: f64,
    /// Blur radius in px.
    pub blur_px: f64,
    /// Stacking order.
    pub z_index: f64,
    /// Fill fraction.
    pub extent: f64,
    /// Whether the node is pinned to the viewport.
    pub pinned: bool,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
            rotation_deg: 0.0,
            blur_px: 0.0,
            z_index: 0.0,
            extent: 1.0,
            pinned: false,
        }
    }
}

impl Presentation {
    /// Fold one output into the state.
    pub fn apply(&mut self, output: MappedOutput) {
        let v = output.value;
        match output.property {
            Property::Opacity => self.opacity = v.clamp(0.0, 1.0),
            Property::Scale => self.scale = Vec2::new(v, v),
            Property::ScaleX => self.scale.x = v,
            Property::ScaleY => self.scale.y = v,
            Property::TranslateX => self.translate.x = v,
            Property::TranslateY => self.translate.y = v,
            Property::Rotate => self.rotation_deg = v,
            Property::Blur => self.blur_px = v.max(0.0),
            Property::ZIndex => self.z_index = v,
            Property::Extent => self.extent = v.clamp(0.0, 1.0),
        }
    }

    /// Current value of `property`. `Scale` reads the vertical component.
    pub fn get(&self, property: Property) -> f64 {
        match property {
            Property::Opacity => self.opacity,
            Property::Scale | Property::ScaleY => self.scale.y,
            Property::ScaleX => self.scale.x,
            Property::TranslateX => self.translate.x,
            Property::TranslateY => self.translate.y,
            Property::Rotate => self.rotation_deg,
            Property::Blur => self.blur_px,
            Property::ZIndex => self.z_index,
            Property::Extent => self.extent,
        }
    }

    /// Transform matrix about the node's local origin.
    pub fn to_affine(&self) -> Affine {
        let t_translate = Affine::translate(self.translate);
        let t_rotate = Affine::rotate(self.rotation_deg.to_radians());
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);

        // Canonical order: T(translate) * R(rot) * S(scale)
        t_translate * t_rotate * t_scale
    }
}
