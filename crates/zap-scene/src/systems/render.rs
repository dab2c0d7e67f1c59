//! Render traversal.
//!
//! Each entity draws inside its own save/restore scope:
//! transform → own content → behavior → children (z-order) → overlay → debug marker.

use std::f32::consts::TAU;
use crate::components::entity::Entity;
use crate::renderer::traits::RenderContext;

impl Entity {
    /// Draw this subtree. Inactive entities, and images that have not
    /// loaded yet, skip their whole subtree.
    pub fn render_recursive(&mut self, ctx: &mut RenderContext<'_>) {
        if !self.active {
            return;
        }
        self.kind.sync(&mut self.node);
        if !self.kind.is_drawable() {
            return;
        }

        ctx.surface.save();
        self.node.transform.apply_to(&mut *ctx.surface);

        self.kind.render(&self.node, &mut *ctx.surface);
        if let Some(behavior) = self.behavior.as_mut() {
            behavior.render(&self.node, &mut *ctx.surface);
        }

        for child in &mut self.children {
            child.render_recursive(ctx);
        }

        self.kind.render_overlay(&self.node, &mut *ctx.surface);

        if let Some(point) = self.debug_point {
            let marker = ctx.debug_marker;
            let surface = &mut *ctx.surface;
            surface.save();
            surface.set_fill_style(&marker.fill);
            surface.set_stroke_style(&marker.stroke);
            surface.begin_path();
            surface.arc(point.x, point.y, marker.radius, 0.0, TAU);
            surface.fill();
            surface.stroke();
            surface.restore();
        }

        ctx.surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use crate::api::config::DebugMarker;
    use crate::api::types::IdAllocator;
    use crate::assets::image::{ImageHandle, ImageId};
    use crate::components::behavior::Behavior;
    use crate::components::entity::{Entity, NodeState};
    use crate::components::sprite::ImageSprite;
    use crate::components::text::TextBlock;
    use crate::renderer::recording::{DrawCommand, RecordingSurface};
    use crate::renderer::traits::{RenderContext, Surface};

    /// Draws its tag as text so render order shows up in `texts()`.
    struct Label(&'static str);

    impl Behavior for Label {
        fn render(&mut self, _node: &NodeState, surface: &mut dyn Surface) {
            surface.fill_text(self.0, 0.0, 0.0);
        }
    }

    fn render(root: &mut Entity) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        root.render_recursive(&mut RenderContext::new(&mut surface));
        assert_eq!(surface.depth(), 0, "unbalanced save/restore");
        surface
    }

    #[test]
    fn pushes_transform_in_order() {
        let mut e = Entity::new(IdAllocator::new().next_id())
            .with_position(Vec2::new(10.0, 20.0))
            .with_rotation(0.0)
            .with_scale(Vec2::new(2.0, 3.0));
        let surface = render(&mut e);
        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::Save,
                DrawCommand::Translate { x: 10.0, y: 20.0 },
                DrawCommand::Rotate { radians: 0.0 },
                DrawCommand::Scale { x: 2.0, y: 3.0 },
                DrawCommand::Restore,
            ]
        );
    }

    #[test]
    fn children_render_in_z_order_and_nest() {
        let mut ids = IdAllocator::new();
        let mut root = Entity::new(ids.next_id()).with_behavior(Label("root"));
        let a = root.add_child(Entity::new(ids.next_id()).with_behavior(Label("a")));
        let mut b = Entity::new(ids.next_id()).with_behavior(Label("b"));
        b.add_child(Entity::new(ids.next_id()).with_behavior(Label("b.child")));
        root.add_child(b);
        root.set_child_z_index(a, 5);

        let surface = render(&mut root);
        assert_eq!(surface.texts(), vec!["root", "b", "b.child", "a"]);
        assert_eq!(surface.max_depth(), 3);
    }

    #[test]
    fn inactive_subtree_is_not_drawn() {
        let mut ids = IdAllocator::new();
        let mut root = Entity::new(ids.next_id()).with_behavior(Label("root"));
        let mut hidden = Entity::new(ids.next_id()).with_behavior(Label("hidden"));
        hidden.add_child(Entity::new(ids.next_id()).with_behavior(Label("hidden.child")));
        hidden.active = false;
        root.add_child(hidden);

        let surface = render(&mut root);
        assert_eq!(surface.texts(), vec!["root"]);
    }

    #[test]
    fn debug_marker_is_drawn_last_in_local_space() {
        let mut ids = IdAllocator::new();
        let mut root = Entity::new(ids.next_id());
        root.add_child(
            Entity::new(ids.next_id())
                .with_position(Vec2::new(50.0, 0.0))
                .with_behavior(Label("child")),
        );
        root.set_debug_point(3.0, 4.0);

        let marker = DebugMarker {
            radius: 2.0,
            ..Default::default()
        };
        let mut surface = RecordingSurface::new();
        root.render_recursive(&mut RenderContext::new(&mut surface).with_debug_marker(&marker));

        let cmds = surface.commands();
        let arc = cmds.iter().position(|c| matches!(c, DrawCommand::Arc { .. })).unwrap();
        let child_text = cmds.iter().position(|c| matches!(c, DrawCommand::FillText { .. })).unwrap();
        assert!(arc > child_text);
        assert_eq!(cmds[arc], DrawCommand::Arc { x: 3.0, y: 4.0, radius: 2.0 });
        assert!(cmds.contains(&DrawCommand::FillStyle("rgb(255, 0,0)".to_owned())));
        // Marker is followed by its own restore and then the root's
        assert_eq!(&cmds[cmds.len() - 2..], &[DrawCommand::Restore, DrawCommand::Restore]);

        root.clear_debug_point();
        let surface = render(&mut root);
        assert!(!surface.commands().iter().any(|c| matches!(c, DrawCommand::Arc { .. })));
    }

    #[test]
    fn unloaded_image_skips_subtree_until_ready() {
        let mut ids = IdAllocator::new();
        let handle = ImageHandle::pending(ImageId(9), "tree.png");
        let mut sprite = Entity::image(ids.next_id(), ImageSprite::new(handle.clone()));
        sprite.add_child(Entity::new(ids.next_id()).with_behavior(Label("leaf")));

        let surface = render(&mut sprite);
        assert!(surface.commands().is_empty());

        handle.resolve(100, 50);
        let surface = render(&mut sprite);
        assert_eq!(sprite.width(), 100.0);
        assert_eq!(sprite.height(), 50.0);
        assert!(surface
            .commands()
            .contains(&DrawCommand::DrawImage { image: ImageId(9), x: -50.0, y: -25.0 }));
        assert_eq!(surface.texts(), vec!["leaf"]);
    }

    #[test]
    fn failed_image_never_renders() {
        let handle = ImageHandle::pending(ImageId(1), "gone.png");
        let mut sprite = Entity::image(IdAllocator::new().next_id(), ImageSprite::new(handle.clone()));
        handle.fail("network error");
        assert!(render(&mut sprite).commands().is_empty());
        assert!(sprite.sprite().unwrap().load_error().is_some());
    }

    #[test]
    fn text_entity_reflows_when_width_changes() {
        let mut e = Entity::text(
            IdAllocator::new().next_id(),
            TextBlock::new("the quick brown fox"),
            100.0,
            200.0,
        );
        let surface = render(&mut e);
        assert_eq!(surface.texts(), vec!["the quick", "brown fox"]);

        e.set_width(200.0);
        let surface = render(&mut e);
        assert_eq!(surface.texts(), vec!["the quick brown fox"]);
    }
}
