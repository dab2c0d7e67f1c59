use std::fmt;
use std::ops::{Deref, DerefMut};
use glam::Vec2;
use log::warn;
use crate::api::types::EntityId;
use crate::components::behavior::Behavior;
use crate::components::sprite::ImageSprite;
use crate::components::text::TextBlock;
use crate::core::rng::Rng;
use crate::extensions::transform::LocalTransform;
use crate::extensions::tween::{Tween, TweenConfig, TweenTarget};
use crate::renderer::traits::Surface;

/// Spatial state of an entity, handed to [`Behavior`] hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeState {
    pub transform: LocalTransform,
    pub width: f32,
    pub height: f32,
    /// Seconds accumulated over every update this entity received.
    pub total_elapsed: f32,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            transform: LocalTransform::default(),
            width: 1.0,
            height: 1.0,
            total_elapsed: 0.0,
        }
    }
}

impl NodeState {
    /// Default containment: the box `[0, width] × [0, height]` in local space.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }
}

/// Built-in content of an entity.
#[derive(Debug, Clone)]
pub enum EntityKind {
    /// No content of its own; groups children and carries behaviors.
    Group,
    Text(TextBlock),
    Image(ImageSprite),
}

impl EntityKind {
    /// Pull asynchronous state (image size) into the node.
    pub(crate) fn sync(&mut self, node: &mut NodeState) {
        if let EntityKind::Image(sprite) = self {
            sprite.sync(node);
        }
    }

    /// Whether this entity and its subtree can be drawn yet.
    pub(crate) fn is_drawable(&self) -> bool {
        match self {
            EntityKind::Image(sprite) => sprite.is_loaded(),
            _ => true,
        }
    }

    pub(crate) fn contains(&self, node: &NodeState, p: Vec2) -> bool {
        match self {
            EntityKind::Image(sprite) => sprite.contains(node, p),
            _ => node.contains(p),
        }
    }

    pub(crate) fn render(&mut self, node: &NodeState, surface: &mut dyn Surface) {
        match self {
            EntityKind::Group => {}
            EntityKind::Text(text) => text.render(node, surface),
            EntityKind::Image(sprite) => sprite.render(surface),
        }
    }

    /// Drawn after the children, still in local space.
    pub(crate) fn render_overlay(&self, node: &NodeState, surface: &mut dyn Surface) {
        if let EntityKind::Image(sprite) = self {
            sprite.render_outline(node, surface);
        }
    }
}

/// A node in the scene graph.
///
/// Owns its children (kept sorted by ascending z-index) and its tweens.
/// The parent link is a plain id, never an owning reference.
pub struct Entity {
    pub(crate) id: EntityId,
    /// Free-form name for lookups.
    pub tag: String,
    /// Inactive entities and their subtrees are frozen: no update, render or hit-test.
    pub active: bool,
    pub(crate) node: NodeState,
    pub(crate) z_index: i32,
    pub(crate) parent: Option<EntityId>,
    pub(crate) children: Vec<Entity>,
    pub(crate) tweens: Vec<(TweenTarget, Tween)>,
    pub(crate) debug_point: Option<Vec2>,
    pub(crate) kind: EntityKind,
    pub(crate) behavior: Option<Box<dyn Behavior>>,
}

impl Entity {
    /// Create an empty group entity at the origin, 1×1 in size.
    pub fn new(id: EntityId) -> Self {
        Self::with_kind(id, EntityKind::Group)
    }

    pub fn with_kind(id: EntityId, kind: EntityKind) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            node: NodeState::default(),
            z_index: 0,
            parent: None,
            children: Vec::new(),
            tweens: Vec::new(),
            debug_point: None,
            kind,
            behavior: None,
        }
    }

    /// A text entity whose wrapping width is `width`.
    pub fn text(id: EntityId, block: TextBlock, width: f32, height: f32) -> Self {
        Self::with_kind(id, EntityKind::Text(block)).with_size(width, height)
    }

    /// An image entity; its size follows the image once loaded.
    pub fn image(id: EntityId, sprite: ImageSprite) -> Self {
        Self::with_kind(id, EntityKind::Image(sprite))
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.node.transform.position = pos;
        self
    }

    /// Rotation in degrees.
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.node.transform.rotation = degrees;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.node.transform.scale = scale;
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.node.width = width;
        self.node.height = height;
        self
    }

    pub fn with_behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    // -- Accessors --

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Id of the entity this one is attached to.
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Set the z-index. For an attached child, go through
    /// [`child_mut`](Entity::child_mut) or
    /// [`set_child_z_index`](Entity::set_child_z_index) so the parent re-sorts.
    pub fn set_z_index(&mut self, z: i32) {
        self.z_index = z;
    }

    pub fn node(&self) -> &NodeState {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut NodeState {
        &mut self.node
    }

    pub fn transform(&self) -> &LocalTransform {
        &self.node.transform
    }

    pub fn position(&self) -> Vec2 {
        self.node.transform.position
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.node.transform.position = Vec2::new(x, y);
    }

    /// Rotation in degrees.
    pub fn rotation(&self) -> f32 {
        self.node.transform.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.node.transform.rotation = degrees;
    }

    pub fn scale(&self) -> Vec2 {
        self.node.transform.scale
    }

    /// Uniform scale.
    pub fn set_scale(&mut self, s: f32) {
        self.node.transform.scale = Vec2::splat(s);
    }

    pub fn set_scale_xy(&mut self, sx: f32, sy: f32) {
        self.node.transform.scale = Vec2::new(sx, sy);
    }

    pub fn width(&self) -> f32 {
        self.node.width
    }

    pub fn height(&self) -> f32 {
        self.node.height
    }

    /// Text entities reflow on the next render when the width changes.
    pub fn set_width(&mut self, width: f32) {
        self.node.width = width;
    }

    pub fn set_height(&mut self, height: f32) {
        self.node.height = height;
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.node.width = width;
        self.node.height = height;
    }

    pub fn total_elapsed(&self) -> f32 {
        self.node.total_elapsed
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    pub fn text_block(&self) -> Option<&TextBlock> {
        match &self.kind {
            EntityKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn text_block_mut(&mut self) -> Option<&mut TextBlock> {
        match &mut self.kind {
            EntityKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn sprite(&self) -> Option<&ImageSprite> {
        match &self.kind {
            EntityKind::Image(sprite) => Some(sprite),
            _ => None,
        }
    }

    pub fn sprite_mut(&mut self) -> Option<&mut ImageSprite> {
        match &mut self.kind {
            EntityKind::Image(sprite) => Some(sprite),
            _ => None,
        }
    }

    /// Scroll a text entity; `fraction` 1.0 shows the end of the text.
    pub fn scroll_text(&mut self, fraction: f32) {
        let height = self.node.height;
        if let Some(text) = self.text_block_mut() {
            text.scroll_to(fraction, height);
        }
    }

    pub fn set_behavior(&mut self, behavior: impl Behavior + 'static) {
        self.behavior = Some(Box::new(behavior));
    }

    pub fn clear_behavior(&mut self) {
        self.behavior = None;
    }

    /// Draw a marker at `(x, y)` in local space on every render.
    pub fn set_debug_point(&mut self, x: f32, y: f32) {
        self.debug_point = Some(Vec2::new(x, y));
    }

    pub fn clear_debug_point(&mut self) {
        self.debug_point = None;
    }

    pub fn debug_point(&self) -> Option<Vec2> {
        self.debug_point
    }

    // -- Hierarchy --

    /// Attach `child` on top of the existing children. Returns its id.
    ///
    /// Every child id must be unique among its siblings; attaching a
    /// duplicate is a bug (it panics in debug builds). Use
    /// [`try_add_child`](Entity::try_add_child) to check instead.
    pub fn add_child(&mut self, child: Entity) -> EntityId {
        match self.try_add_child(child) {
            Ok(id) => id,
            Err(child) => {
                debug_assert!(false, "{:?} already has a child {:?}", self.id, child.id);
                warn!("{:?} already has a child {:?}; lookups by id will find the first", self.id, child.id);
                self.attach(child)
            }
        }
    }

    /// Attach `child` unless a child with the same id is already present,
    /// in which case it is handed back untouched.
    pub fn try_add_child(&mut self, child: Entity) -> Result<EntityId, Entity> {
        if self.child(child.id).is_some() {
            return Err(child);
        }
        Ok(self.attach(child))
    }

    fn attach(&mut self, mut child: Entity) -> EntityId {
        let id = child.id;
        child.z_index = self.children.len() as i32;
        child.parent = Some(self.id);
        self.children.push(child);
        self.sort_children();
        id
    }

    /// Detach the first child with `id` and hand it back. `None` if absent.
    pub fn remove_child(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.children.iter().position(|c| c.id == id)?;
        let mut child = self.children.remove(index);
        child.parent = None;
        Some(child)
    }

    /// Children in ascending z-index order.
    pub fn children(&self) -> &[Entity] {
        &self.children
    }

    pub fn child(&self, id: EntityId) -> Option<&Entity> {
        self.children.iter().find(|c| c.id == id)
    }

    /// Mutable access to a direct child. Dropping the guard re-sorts the
    /// children if the child's z-index changed.
    pub fn child_mut(&mut self, id: EntityId) -> Option<ChildMut<'_>> {
        let index = self.children.iter().position(|c| c.id == id)?;
        let z_index = self.children[index].z_index;
        Some(ChildMut {
            siblings: &mut self.children,
            index,
            z_index,
        })
    }

    /// Change a direct child's z-index and re-sort. Returns false if absent.
    pub fn set_child_z_index(&mut self, id: EntityId, z: i32) -> bool {
        match self.child_mut(id) {
            Some(mut child) => {
                child.set_z_index(z);
                true
            }
            None => false,
        }
    }

    /// Deal the children's current z-indices back out in random order and
    /// re-sort. The set of z-indices is unchanged.
    pub fn shuffle_z_order(&mut self, rng: &mut Rng) {
        let mut z_indices: Vec<i32> = self.children.iter().map(|c| c.z_index).collect();
        rng.shuffle(&mut z_indices);
        for (child, z) in self.children.iter_mut().zip(z_indices) {
            child.z_index = z;
        }
        self.sort_children();
    }

    /// Depth-first search of this subtree (including `self`).
    pub fn find(&self, id: EntityId) -> Option<&Entity> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// First entity in this subtree (including `self`) with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_tag(tag))
    }

    /// Stable sort: equal z-indices keep insertion order.
    fn sort_children(&mut self) {
        self.children.sort_by_key(|c| c.z_index);
    }

    // -- Animation --

    /// Animate one transform field from its current value to `value`.
    pub fn tween(&mut self, target: TweenTarget, value: f32, config: TweenConfig) {
        let start = target.read(&self.node.transform);
        self.tweens.push((target, Tween::new(start, value, config)));
    }

    pub fn tween_position_x(&mut self, x: f32, config: TweenConfig) {
        self.tween(TweenTarget::PositionX, x, config);
    }

    pub fn tween_position_y(&mut self, y: f32, config: TweenConfig) {
        self.tween(TweenTarget::PositionY, y, config);
    }

    /// Animate both axes with the same timing. Callbacks ride on the X tween.
    pub fn tween_position(&mut self, x: f32, y: f32, config: TweenConfig) {
        let y_config = config.timing_only();
        self.tween_position_x(x, config);
        self.tween_position_y(y, y_config);
    }

    /// Rotation target in degrees.
    pub fn tween_rotation(&mut self, degrees: f32, config: TweenConfig) {
        self.tween(TweenTarget::Rotation, degrees, config);
    }

    pub fn tween_scale_x(&mut self, sx: f32, config: TweenConfig) {
        self.tween(TweenTarget::ScaleX, sx, config);
    }

    pub fn tween_scale_y(&mut self, sy: f32, config: TweenConfig) {
        self.tween(TweenTarget::ScaleY, sy, config);
    }

    /// Drop every pending tween without firing callbacks.
    pub fn stop_all_animations(&mut self) {
        self.tweens.clear();
    }

    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }

    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    /// Containment test in local space.
    pub fn point_inside(&self, local: Vec2) -> bool {
        self.behavior
            .as_ref()
            .and_then(|b| b.point_inside(&self.node, local))
            .unwrap_or_else(|| self.kind.contains(&self.node, local))
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("active", &self.active)
            .field("node", &self.node)
            .field("z_index", &self.z_index)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("tweens", &self.tweens.len())
            .field("kind", &self.kind)
            .field("behavior", &self.behavior.is_some())
            .finish()
    }
}

/// Mutable borrow of a child that keeps its siblings sorted.
pub struct ChildMut<'a> {
    siblings: &'a mut Vec<Entity>,
    index: usize,
    z_index: i32,
}

impl Deref for ChildMut<'_> {
    type Target = Entity;

    fn deref(&self) -> &Entity {
        &self.siblings[self.index]
    }
}

impl DerefMut for ChildMut<'_> {
    fn deref_mut(&mut self) -> &mut Entity {
        &mut self.siblings[self.index]
    }
}

impl Drop for ChildMut<'_> {
    fn drop(&mut self) {
        if self.siblings[self.index].z_index != self.z_index {
            self.siblings.sort_by_key(|c| c.z_index);
        }
    }
}
