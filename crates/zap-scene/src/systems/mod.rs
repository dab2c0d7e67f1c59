// systems/mod.rs
//
// Depth-first traversals over the entity tree. Each adds inherent methods
// to `Entity`; the stage drives them once per frame or per pointer event.

pub mod hit;
pub mod render;
pub mod update;
