//! Pointer routing.
//!
//! Pointer-down walks the tree top-down. Each entity maps the point into its
//! own local space, and only an entity that contains the point forwards it
//! to its children. A child's own box is tested on its own terms; it is not
//! intersected with the parent's box.

use glam::Vec2;
use crate::components::entity::Entity;

impl Entity {
    /// Route a pointer-down given in this entity's parent space.
    ///
    /// Returns whether this entity was hit. Inactive entities are never hit
    /// and never forward to their children.
    pub fn handle_pointer_down_recursive(&mut self, point: Vec2) -> bool {
        if !self.active {
            return false;
        }
        self.kind.sync(&mut self.node);

        let local = self.node.transform.inverse_transform_point(point);
        if !self.point_inside(local) {
            return false;
        }

        if let Some(behavior) = self.behavior.as_mut() {
            behavior.pointer_down(&mut self.node, local);
        }
        for child in &mut self.children {
            child.handle_pointer_down_recursive(local);
        }
        true
    }

    /// Deliver a pointer-up to this entity's behavior only, without traversal.
    pub fn dispatch_pointer_up(&mut self, point: Vec2) {
        if let Some(behavior) = self.behavior.as_mut() {
            behavior.pointer_up(&mut self.node, point);
        }
    }

    /// Deliver a pointer-move to this entity's behavior only, without traversal.
    pub fn dispatch_pointer_move(&mut self, point: Vec2) {
        if let Some(behavior) = self.behavior.as_mut() {
            behavior.pointer_move(&mut self.node, point);
        }
    }
}
