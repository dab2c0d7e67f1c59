// extensions/mod.rs
//
// Animation and transform math used by entities.
// Easing curves, local transforms and the per-field tween.

pub mod easing;
pub mod transform;
pub mod tween;

pub use easing::{Easing, lerp, ease};
pub use transform::LocalTransform;
pub use tween::{Tween, TweenConfig, TweenTarget, EPSILON};
