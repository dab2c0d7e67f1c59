pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{StageConfig, DebugMarker};
pub use api::stage::Stage;
pub use api::types::{EntityId, IdAllocator};
pub use components::entity::{Entity, EntityKind, NodeState, ChildMut};
pub use components::behavior::{Behavior, OnPointerDown, OnUpdate};
pub use components::text::{TextBlock, TextStyle, Overflow, wrap_words};
pub use components::sprite::ImageSprite;
pub use assets::image::{ImageHandle, ImageId, ImageState, ImageLoader, LoadError};
pub use core::time::FrameClock;
pub use core::rng::Rng;
pub use core::vector::{Vector2, VectorOps};
pub use renderer::traits::{Surface, TextAlign, RenderContext};
pub use renderer::recording::{RecordingSurface, DrawCommand};
pub use input::pointer::{InputEvent, SurfaceBounds};

// Extensions: animation and transform math
pub use extensions::{
    Easing, lerp, ease,
    LocalTransform,
    Tween, TweenConfig, TweenTarget, EPSILON,
};
