use glam::Vec2;
use crate::assets::image::{ImageHandle, LoadError};
use crate::components::entity::NodeState;
use crate::renderer::traits::Surface;

/// Image content of an entity.
///
/// Until the handle resolves, the sprite (and its whole subtree) is not
/// drawn. Once it resolves, the entity adopts the image's pixel size.
#[derive(Debug, Clone)]
pub struct ImageSprite {
    handle: ImageHandle,
    /// Normalized anchor inside the image; (0.5, 0.5) centers it on the entity position.
    origin: Vec2,
    /// Stroke the sprite bounds after drawing children.
    show_bounds: bool,
    /// Size already copied onto the entity.
    adopted: bool,
}

impl ImageSprite {
    pub fn new(handle: ImageHandle) -> Self {
        Self {
            handle,
            origin: Vec2::splat(0.5),
            show_bounds: false,
            adopted: false,
        }
    }

    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.set_origin(x, y);
        self
    }

    pub fn with_bounds_outline(mut self, show: bool) -> Self {
        self.show_bounds = show;
        self
    }

    /// Set the anchor; each component is clamped into [0, 1].
    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.origin = Vec2::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0));
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn handle(&self) -> &ImageHandle {
        &self.handle
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.is_ready()
    }

    pub fn load_error(&self) -> Option<LoadError> {
        self.handle.error()
    }

    /// Copy the image size onto the entity the first time it is known.
    pub(crate) fn sync(&mut self, node: &mut NodeState) {
        if self.adopted {
            return;
        }
        if let Some((width, height)) = self.handle.dimensions() {
            node.width = width as f32;
            node.height = height as f32;
            self.adopted = true;
        }
    }

    /// Top-left corner of a `width`×`height` box anchored at the origin.
    fn corner(&self, width: f32, height: f32) -> Vec2 {
        Vec2::new(-(width * self.origin.x), -(height * self.origin.y))
    }

    pub(crate) fn contains(&self, node: &NodeState, p: Vec2) -> bool {
        let min = self.corner(node.width, node.height);
        let max = min + Vec2::new(node.width, node.height);
        p.x >= min.x && p.y >= min.y && p.x <= max.x && p.y <= max.y
    }

    pub(crate) fn render(&self, surface: &mut dyn Surface) {
        if let Some((width, height)) = self.handle.dimensions() {
            let at = self.corner(width as f32, height as f32);
            surface.draw_image(self.handle.id(), at.x, at.y);
        }
    }

    pub(crate) fn render_outline(&self, node: &NodeState, surface: &mut dyn Surface) {
        if self.show_bounds {
            let at = self.corner(node.width, node.height);
            surface.stroke_rect(at.x, at.y, node.width, node.height);
        }
    }
}
