// extensions/transform.rs
//
// Local transform of a scene-graph node relative to its parent.
//
// Forward chain (what the render pass pushes onto the surface):
//   translate(position) · rotate(rotation) · scale(scale)
// Inverse chain (what hit-testing applies to a parent-space point):
//   translate(-position), rotate(-rotation), scale(1 / scale)

use glam::{Affine2, Vec2};
use crate::core::vector::VectorOps;
use crate::renderer::traits::Surface;

/// Position, rotation and scale of an entity relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Offset from the parent's origin.
    pub position: Vec2,
    /// Rotation in degrees (clockwise on a Y-down surface).
    pub rotation: f32,
    /// Per-axis scale. Zero on either axis makes the transform non-invertible.
    pub scale: Vec2,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Rotation in radians.
    #[inline]
    pub fn rotation_radians(&self) -> f32 {
        self.rotation.to_radians()
    }

    /// The forward transform as an affine matrix (local → parent space).
    pub fn to_affine(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(self.scale, self.rotation_radians(), self.position)
    }

    /// Map a point from local space into parent space.
    pub fn transform_point(&self, local: Vec2) -> Vec2 {
        self.to_affine().transform_point2(local)
    }

    /// Map a point from parent space into local space.
    ///
    /// Un-rotates before un-scaling, the reverse of [`apply_to`](Self::apply_to).
    /// Scaling first would only invert uniform scales.
    pub fn inverse_transform_point(&self, point: Vec2) -> Vec2 {
        let mut p = point;
        p.translate_in_place(-self.position.x, -self.position.y);
        p.rotate_deg_in_place(-self.rotation);
        p.scale_x_in_place(1.0 / self.scale.x);
        p.scale_y_in_place(1.0 / self.scale.y);
        p
    }

    /// Compose this transform onto the surface's current transform.
    pub fn apply_to(&self, surface: &mut dyn Surface) {
        surface.translate(self.position.x, self.position.y);
        surface.rotate(self.rotation_radians());
        surface.scale(self.scale.x, self.scale.y);
    }
}
