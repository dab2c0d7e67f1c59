use std::cell::Cell;
use std::rc::Rc;

/// Unique identifier for an entity in the scene graph.
///
/// Only an [`IdAllocator`] mints ids outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub(crate) u32);

impl EntityId {
    /// Raw numeric value, e.g. for logging.
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Monotonic entity id source. Ids are never reused.
///
/// Clones share one counter, so every stage (and any code creating
/// entities directly) that draws from clones of the same allocator gets
/// distinct ids. [`Stage::with_ids`](crate::Stage::with_ids) binds a stage
/// to an existing allocator.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: Rc<Cell<u32>>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next: Rc::new(Cell::new(0)),
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = self.next.get();
        self.next.set(id + 1);
        EntityId(id)
    }

    /// Number of ids handed out so far, across all clones.
    pub fn issued(&self) -> u32 {
        self.next.get()
    }

    /// Whether `other` draws from the same counter.
    pub fn shares_counter(&self, other: &IdAllocator) -> bool {
        Rc::ptr_eq(&self.next, &other.next)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
