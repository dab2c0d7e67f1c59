//! Update traversal: behaviors, then tweens, then children in z-order.

use crate::components::entity::Entity;

impl Entity {
    /// Advance this subtree by `dt` seconds.
    ///
    /// Inactive entities freeze their whole subtree. A non-finite `dt` (no
    /// previous frame) skips the tick entirely.
    pub fn update_recursive(&mut self, dt: f32) {
        if !self.active || !dt.is_finite() {
            return;
        }

        self.node.total_elapsed += dt;
        self.kind.sync(&mut self.node);

        if let Some(behavior) = self.behavior.as_mut() {
            behavior.update(&mut self.node, dt);
        }

        if !self.tweens.is_empty() {
            let transform = &mut self.node.transform;
            for (target, tween) in &mut self.tweens {
                tween.advance(dt, |value| target.apply(transform, value));
            }
            self.tweens.retain(|(_, tween)| tween.is_active());
        }

        for child in &mut self.children {
            child.update_recursive(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::types::IdAllocator;
    use crate::components::behavior::OnUpdate;
    use crate::components::entity::{Entity, NodeState};
    use crate::extensions::tween::{TweenConfig, EPSILON};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Behavior that logs its entity's tag into a shared trace on update.
    fn trace(log: &Rc<RefCell<Vec<String>>>, tag: &str) -> OnUpdate<impl FnMut(&mut NodeState, f32)> {
        let log = Rc::clone(log);
        let tag = tag.to_owned();
        OnUpdate(move |_: &mut NodeState, _: f32| log.borrow_mut().push(tag.clone()))
    }

    #[test]
    fn accumulates_elapsed_time() {
        let mut e = Entity::new(IdAllocator::new().next_id());
        e.update_recursive(0.25);
        e.update_recursive(0.5);
        assert!((e.total_elapsed() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn non_finite_delta_is_skipped() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut e = Entity::new(IdAllocator::new().next_id())
            .with_behavior(OnUpdate(move |_: &mut NodeState, _: f32| counter.set(counter.get() + 1)));
        e.update_recursive(f32::NAN);
        e.update_recursive(f32::INFINITY);
        assert_eq!(calls.get(), 0);
        assert_eq!(e.total_elapsed(), 0.0);
        e.update_recursive(0.1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn parents_before_children_in_z_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ids = IdAllocator::new();
        let mut root = Entity::new(ids.next_id()).with_behavior(trace(&log, "root"));
        let low = root.add_child(Entity::new(ids.next_id()).with_behavior(trace(&log, "low")));
        let mut high = Entity::new(ids.next_id()).with_behavior(trace(&log, "high"));
        high.add_child(Entity::new(ids.next_id()).with_behavior(trace(&log, "high.child")));
        root.add_child(high);
        root.set_child_z_index(low, 10);

        root.update_recursive(0.016);
        assert_eq!(*log.borrow(), vec!["root", "high", "high.child", "low"]);
    }

    #[test]
    fn inactive_subtree_is_frozen() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ids = IdAllocator::new();
        let mut root = Entity::new(ids.next_id());
        let mut sleeper = Entity::new(ids.next_id()).with_behavior(trace(&log, "sleeper"));
        sleeper.add_child(Entity::new(ids.next_id()).with_behavior(trace(&log, "sleeper.child")));
        sleeper.tween_position_x(100.0, TweenConfig::new());
        sleeper.active = false;
        let sleeper_id = root.add_child(sleeper);

        for _ in 0..10 {
            root.update_recursive(0.5);
        }
        assert!(log.borrow().is_empty());
        let sleeper = root.child(sleeper_id).unwrap();
        assert_eq!(sleeper.position().x, 0.0);
        assert_eq!(sleeper.total_elapsed(), 0.0);
        assert_eq!(sleeper.tween_count(), 1);
    }

    #[test]
    fn tweens_drive_fields_and_are_dropped_on_completion() {
        let done = Rc::new(Cell::new(0));
        let counter = Rc::clone(&done);
        let mut e = Entity::new(IdAllocator::new().next_id());
        e.tween_position(
            100.0,
            -50.0,
            TweenConfig::new().on_complete(move || counter.set(counter.get() + 1)),
        );
        e.tween_rotation(180.0, TweenConfig::new().with_duration(2.0));

        e.update_recursive(0.5);
        assert!((e.position().x - 50.0).abs() < EPSILON);
        assert!((e.position().y + 25.0).abs() < EPSILON);
        assert!((e.rotation() - 45.0).abs() < EPSILON);
        assert_eq!(e.tween_count(), 3);

        e.update_recursive(0.6);
        assert_eq!(e.position().x, 100.0);
        assert_eq!(e.position().y, -50.0);
        assert_eq!(done.get(), 1);
        // Only the rotation tween is still running
        assert_eq!(e.tween_count(), 1);

        e.update_recursive(1.0);
        assert_eq!(e.rotation(), 180.0);
        assert!(!e.is_animating());
        assert_eq!(done.get(), 1);
    }

    #[test]
    fn converged_tween_is_discarded_silently() {
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let mut e = Entity::new(IdAllocator::new().next_id()).with_position(glam::Vec2::new(10.0, 0.0));
        e.tween_position_x(10.001, TweenConfig::new().on_complete(move || flag.set(true)));
        e.update_recursive(0.1);
        assert!(!e.is_animating());
        assert!(!fired.get());
        assert_eq!(e.position().x, 10.0);
    }

    #[test]
    fn completion_callback_sees_final_value() {
        let seen = Rc::new(Cell::new(0.0));
        let sink = Rc::clone(&seen);
        let mut e = Entity::new(IdAllocator::new().next_id());
        e.tween_scale_x(
            3.0,
            TweenConfig::new()
                .with_duration(0.1)
                .on_tick(move |v| sink.set(v)),
        );
        e.update_recursive(0.2);
        assert_eq!(seen.get(), 3.0);
        assert_eq!(e.scale().x, 3.0);
    }
}
