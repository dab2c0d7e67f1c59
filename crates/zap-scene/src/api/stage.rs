use glam::Vec2;
use log::debug;
use crate::api::config::StageConfig;
use crate::api::types::{EntityId, IdAllocator};
use crate::assets::image::ImageLoader;
use crate::components::entity::Entity;
use crate::components::sprite::ImageSprite;
use crate::components::text::TextBlock;
use crate::core::time::FrameClock;
use crate::input::pointer::{InputEvent, SurfaceBounds};
use crate::renderer::traits::{RenderContext, Surface};

/// The root of a scene bound to a drawing surface.
///
/// Owns the root entity, the frame clock and the id allocator. The host
/// calls [`frame`](Stage::frame) once per display refresh and forwards
/// pointer events to [`handle_input`](Stage::handle_input).
pub struct Stage<S: Surface> {
    root: Entity,
    surface: S,
    clock: FrameClock,
    ids: IdAllocator,
    bounds: SurfaceBounds,
    config: StageConfig,
}

impl<S: Surface> Stage<S> {
    /// Bind a new stage to `surface`. The root entity takes the size of
    /// `bounds`, or the configured size when the bounds have no area.
    pub fn new(surface: S, bounds: SurfaceBounds, config: StageConfig) -> Self {
        Self::with_ids(surface, bounds, config, IdAllocator::new())
    }

    /// Like [`new`](Stage::new), but draws entity ids from `ids`. Stages
    /// built from clones of one allocator never hand out the same id, so
    /// entities may move between them.
    pub fn with_ids(surface: S, bounds: SurfaceBounds, config: StageConfig, mut ids: IdAllocator) -> Self {
        let (width, height) = if bounds.has_area() {
            (bounds.width, bounds.height)
        } else {
            (config.width, config.height)
        };
        let root = Entity::new(ids.next_id()).with_tag("root").with_size(width, height);
        debug!("stage: {}x{} at ({}, {})", width, height, bounds.x, bounds.y);

        Self {
            root,
            surface,
            clock: FrameClock::new(),
            ids,
            bounds,
            config,
        }
    }

    pub fn root(&self) -> &Entity {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Entity {
        &mut self.root
    }

    /// Attach an entity directly under the root.
    pub fn add_child(&mut self, child: Entity) -> EntityId {
        self.root.add_child(child)
    }

    pub fn remove_child(&mut self, id: EntityId) -> Option<Entity> {
        self.root.remove_child(id)
    }

    pub fn next_id(&mut self) -> EntityId {
        self.ids.next_id()
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    /// A handle on this stage's id counter, for building entities
    /// elsewhere or binding another stage with [`with_ids`](Stage::with_ids).
    pub fn id_allocator(&self) -> IdAllocator {
        self.ids.clone()
    }

    /// A fresh, unattached group entity.
    pub fn create_entity(&mut self) -> Entity {
        Entity::new(self.ids.next_id())
    }

    /// A text entity styled with the configured text defaults.
    pub fn create_text(&mut self, content: impl Into<String>, width: f32, height: f32) -> Entity {
        let block = TextBlock::with_style(content, self.config.text.clone());
        Entity::text(self.ids.next_id(), block, width, height)
    }

    /// An image entity that starts loading `src` immediately.
    pub fn create_image(&mut self, loader: &mut dyn ImageLoader, src: &str) -> Entity {
        let [ox, oy] = self.config.image_origin;
        let sprite = ImageSprite::new(loader.load(src)).with_origin(ox, oy);
        Entity::image(self.ids.next_id(), sprite)
    }

    /// Run one frame at `timestamp_ms` (monotonic milliseconds).
    ///
    /// Updates the tree with the seconds elapsed since the previous frame,
    /// then clears the surface and renders. The first frame, and any frame
    /// whose clock went backwards, renders without updating.
    pub fn frame(&mut self, timestamp_ms: f64) {
        match self.clock.tick(timestamp_ms) {
            Some(dt) if dt >= 0.0 => self.root.update_recursive(dt),
            Some(dt) => debug!("frame: negative delta {dt}s, update skipped"),
            None => debug!("frame: first tick at {timestamp_ms}ms, update skipped"),
        }

        self.surface.clear_rect(0.0, 0.0, self.root.width(), self.root.height());
        let mut ctx = RenderContext::new(&mut self.surface).with_debug_marker(&self.config.debug_marker);
        self.root.render_recursive(&mut ctx);
    }

    /// Route a pointer event given in client coordinates.
    ///
    /// Pointer-down runs the hit-test traversal from the root. Pointer-up
    /// and pointer-move go to the root's behavior only, in surface-local
    /// coordinates.
    pub fn handle_input(&mut self, event: InputEvent) {
        let point: Vec2 = self.bounds.to_local(event.client_position());
        match event {
            InputEvent::PointerDown { .. } => {
                self.root.handle_pointer_down_recursive(point);
            }
            InputEvent::PointerUp { .. } => self.root.dispatch_pointer_up(point),
            InputEvent::PointerMove { .. } => self.root.dispatch_pointer_move(point),
        }
    }

    pub fn bounds(&self) -> SurfaceBounds {
        self.bounds
    }

    /// Update the on-screen rectangle, e.g. after a layout change.
    pub fn set_bounds(&mut self, bounds: SurfaceBounds) {
        if bounds.has_area() {
            self.root.set_size(bounds.width, bounds.height);
        }
        self.bounds = bounds;
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }
}
