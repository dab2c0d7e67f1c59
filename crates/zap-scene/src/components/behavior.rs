use glam::Vec2;
use crate::components::entity::NodeState;
use crate::renderer::traits::Surface;

/// Per-entity hooks invoked by the update, render and pointer traversals.
///
/// Every method has an empty default, so implementors only override what
/// they need. Hooks receive the owning entity's [`NodeState`]; points are
/// in the entity's local space.
pub trait Behavior {
    /// Called once per frame before the entity's tweens advance.
    fn update(&mut self, _node: &mut NodeState, _dt: f32) {}

    /// Draw in local coordinates, after the entity's own text/image content
    /// and before its children.
    fn render(&mut self, _node: &NodeState, _surface: &mut dyn Surface) {}

    /// Override containment. `None` keeps the entity's default test.
    fn point_inside(&self, _node: &NodeState, _point: Vec2) -> Option<bool> {
        None
    }

    /// The pointer went down inside this entity.
    fn pointer_down(&mut self, _node: &mut NodeState, _point: Vec2) {}

    /// Pointer released. Only delivered to the stage root.
    fn pointer_up(&mut self, _node: &mut NodeState, _point: Vec2) {}

    /// Pointer moved. Only delivered to the stage root.
    fn pointer_move(&mut self, _node: &mut NodeState, _point: Vec2) {}
}

/// Closure adapter: a behavior that only reacts to pointer-down.
pub struct OnPointerDown<F>(pub F);

impl<F> Behavior for OnPointerDown<F>
where
    F: FnMut(&mut NodeState, Vec2),
{
    fn pointer_down(&mut self, node: &mut NodeState, point: Vec2) {
        (self.0)(node, point);
    }
}

/// Closure adapter: a behavior that only reacts to update ticks.
pub struct OnUpdate<F>(pub F);

impl<F> Behavior for OnUpdate<F>
where
    F: FnMut(&mut NodeState, f32),
{
    fn update(&mut self, node: &mut NodeState, dt: f32) {
        (self.0)(node, dt);
    }
}
