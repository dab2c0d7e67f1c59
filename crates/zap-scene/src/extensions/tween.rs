// extensions/tween.rs
//
// Tween: time-driven interpolation of one scalar.
//
// Usage:
//   let mut t = Tween::new(0.0, 100.0, TweenConfig::new().with_duration(0.5));
//   t.update(dt);            // advances, fires on_tick / on_complete
//   entity.tween_position_x(200.0, TweenConfig::new());  // bound to a field

use std::fmt;
use super::easing::{ease, Easing};
use super::transform::LocalTransform;

/// Distance below which an animated value counts as equal to its target.
pub const EPSILON: f32 = 0.01;

/// Observer invoked with the current value on every active tick.
pub type TickFn = Box<dyn FnMut(f32)>;
/// Invoked exactly once when a tween reaches its target.
pub type CompleteFn = Box<dyn FnOnce()>;

/// How a tween is driven: duration, curve and callbacks.
pub struct TweenConfig {
    /// Duration in seconds (default: 1.0).
    pub duration: f32,
    /// Easing curve (default: linear).
    pub easing: Easing,
    pub on_tick: Option<TickFn>,
    pub on_complete: Option<CompleteFn>,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            duration: 1.0,
            easing: Easing::Linear,
            on_tick: None,
            on_complete: None,
        }
    }
}

impl TweenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn on_tick(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_tick = Some(Box::new(f));
        self
    }

    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Same duration and easing, no callbacks.
    pub(crate) fn timing_only(&self) -> Self {
        Self {
            duration: self.duration,
            easing: self.easing,
            on_tick: None,
            on_complete: None,
        }
    }
}

impl fmt::Debug for TweenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenConfig")
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("on_tick", &self.on_tick.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// A single scalar animation.
///
/// A tween whose start and target are already within [`EPSILON`] is created
/// inactive and never fires its callbacks. Otherwise it completes, snapping to
/// the target and firing `on_complete` once, when elapsed time exceeds the
/// duration or the value lands within [`EPSILON`] of the target.
pub struct Tween {
    start: f32,
    current: f32,
    target: f32,
    elapsed: f32,
    duration: f32,
    direction: i8,
    easing: Easing,
    active: bool,
    on_tick: Option<TickFn>,
    on_complete: Option<CompleteFn>,
}

impl Tween {
    pub fn new(start: f32, target: f32, config: TweenConfig) -> Self {
        let direction = if target > start {
            1
        } else if target < start {
            -1
        } else {
            0
        };

        Self {
            start,
            current: start,
            target,
            elapsed: 0.0,
            duration: config.duration,
            direction,
            easing: config.easing,
            active: (target - start).abs() >= EPSILON,
            on_tick: config.on_tick,
            on_complete: config.on_complete,
        }
    }

    /// Linear tween without callbacks.
    pub fn linear(start: f32, target: f32, duration: f32) -> Self {
        Self::new(start, target, TweenConfig::new().with_duration(duration))
    }

    /// Advance by `dt` seconds. No-op once inactive.
    pub fn update(&mut self, dt: f32) {
        self.advance(dt, |_| {});
    }

    /// Advance by `dt` seconds, handing the new value to `apply` before the
    /// tick observer and the completion callback run.
    pub(crate) fn advance(&mut self, dt: f32, apply: impl FnOnce(f32)) {
        if !self.active {
            return;
        }

        self.elapsed += dt;
        let t = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        self.current = ease(self.start, self.target, t, self.easing);

        let finished =
            self.elapsed > self.duration || (self.current - self.target).abs() < EPSILON;
        if finished {
            self.current = self.target;
            self.active = false;
        }

        apply(self.current);
        if let Some(on_tick) = self.on_tick.as_mut() {
            on_tick(self.current);
        }
        if finished {
            if let Some(on_complete) = self.on_complete.take() {
                on_complete();
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn value(&self) -> f32 {
        self.current
    }

    pub fn start_value(&self) -> f32 {
        self.start
    }

    pub fn target_value(&self) -> f32 {
        self.target
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Sign of `target - start`: 1, -1, or 0.
    pub fn direction(&self) -> i8 {
        self.direction
    }

    /// Normalized progress in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("start", &self.start)
            .field("current", &self.current)
            .field("target", &self.target)
            .field("elapsed", &self.elapsed)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

/// Which transform field an entity-owned tween writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenTarget {
    PositionX,
    PositionY,
    /// Rotation in degrees.
    Rotation,
    ScaleX,
    ScaleY,
}

impl TweenTarget {
    /// Current value of the field.
    pub fn read(self, transform: &LocalTransform) -> f32 {
        match self {
            TweenTarget::PositionX => transform.position.x,
            TweenTarget::PositionY => transform.position.y,
            TweenTarget::Rotation => transform.rotation,
            TweenTarget::ScaleX => transform.scale.x,
            TweenTarget::ScaleY => transform.scale.y,
        }
    }

    /// Write `value` into the field.
    pub fn apply(self, transform: &mut LocalTransform, value: f32) {
        match self {
            TweenTarget::PositionX => transform.position.x = value,
            TweenTarget::PositionY => transform.position.y = value,
            TweenTarget::Rotation => transform.rotation = value,
            TweenTarget::ScaleX => transform.scale.x = value,
            TweenTarget::ScaleY => transform.scale.y = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn counting_config(count: &Rc<Cell<u32>>) -> TweenConfig {
        let count = Rc::clone(count);
        TweenConfig::new().on_complete(move || count.set(count.get() + 1))
    }

    #[test]
    fn halfway_then_complete() {
        let fired = Rc::new(Cell::new(0));
        let mut tween = Tween::new(0.0, 100.0, counting_config(&fired));

        tween.update(0.5);
        assert!((tween.value() - 50.0).abs() < EPSILON);
        assert!(tween.is_active());
        assert_eq!(fired.get(), 0);

        tween.update(0.6);
        assert_eq!(tween.value(), 100.0);
        assert!(!tween.is_active());
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn idempotent_once_inactive() {
        let fired = Rc::new(Cell::new(0));
        let mut tween = Tween::new(10.0, -10.0, counting_config(&fired).with_duration(0.2));
        tween.update(1.0);
        assert_eq!(tween.value(), -10.0);

        for _ in 0..5 {
            tween.update(0.3);
        }
        assert_eq!(tween.value(), -10.0);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn converged_at_creation_never_fires() {
        let fired = Rc::new(Cell::new(0));
        let ticks = Rc::new(Cell::new(0));
        let ticks_in = Rc::clone(&ticks);
        let mut tween = Tween::new(
            5.0,
            5.005,
            counting_config(&fired).on_tick(move |_| ticks_in.set(ticks_in.get() + 1)),
        );
        assert!(!tween.is_active());

        tween.update(0.5);
        tween.update(2.0);
        assert_eq!(fired.get(), 0);
        assert_eq!(ticks.get(), 0);
        assert_eq!(tween.value(), 5.0);
    }

    #[test]
    fn completes_within_epsilon_before_duration() {
        let fired = Rc::new(Cell::new(0));
        let mut tween = Tween::new(0.0, 1.0, counting_config(&fired));
        // 0.995 is within EPSILON of the target while elapsed < duration
        tween.update(0.995);
        assert!(!tween.is_active());
        assert_eq!(tween.value(), 1.0);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn on_tick_sees_every_value_and_final_target() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_in = Rc::clone(&seen);
        let mut tween = Tween::new(
            0.0,
            10.0,
            TweenConfig::new()
                .with_duration(1.0)
                .on_tick(move |v| seen_in.borrow_mut().push(v)),
        );
        tween.update(0.25);
        tween.update(0.25);
        tween.update(1.0);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!((seen[0] - 2.5).abs() < 1e-4);
        assert!((seen[1] - 5.0).abs() < 1e-4);
        assert_eq!(seen[2], 10.0);
    }

    #[test]
    fn tick_observer_runs_before_completion() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (Rc::clone(&order), Rc::clone(&order));
        let mut tween = Tween::new(
            0.0,
            1.0,
            TweenConfig::new()
                .with_duration(0.1)
                .on_tick(move |_| a.borrow_mut().push("tick"))
                .on_complete(move || b.borrow_mut().push("complete")),
        );
        tween.update(0.2);
        assert_eq!(*order.borrow(), vec!["tick", "complete"]);
    }

    #[test]
    fn direction_follows_target() {
        assert_eq!(Tween::linear(0.0, 5.0, 1.0).direction(), 1);
        assert_eq!(Tween::linear(5.0, 0.0, 1.0).direction(), -1);
        assert_eq!(Tween::linear(3.0, 3.0, 1.0).direction(), 0);
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut tween = Tween::linear(0.0, 50.0, 0.0);
        tween.update(0.016);
        assert_eq!(tween.value(), 50.0);
        assert!(!tween.is_active());
    }

    #[test]
    fn eased_tween_still_lands_on_target() {
        let mut tween = Tween::new(
            0.0,
            100.0,
            TweenConfig::new().with_easing(Easing::QuadIn),
        );
        tween.update(0.5);
        assert!(tween.value() < 50.0);
        tween.update(0.6);
        assert_eq!(tween.value(), 100.0);
    }

    #[test]
    fn target_reads_and_writes_fields() {
        let mut transform = LocalTransform::default();
        TweenTarget::PositionY.apply(&mut transform, 7.0);
        TweenTarget::Rotation.apply(&mut transform, 45.0);
        TweenTarget::ScaleX.apply(&mut transform, 2.0);
        assert_eq!(TweenTarget::PositionY.read(&transform), 7.0);
        assert_eq!(TweenTarget::Rotation.read(&transform), 45.0);
        assert_eq!(TweenTarget::ScaleX.read(&transform), 2.0);
        assert_eq!(TweenTarget::ScaleY.read(&transform), 1.0);
    }
}
