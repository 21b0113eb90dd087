//! Desktop items and the placement table

#[allow(clippy::module_inception)]
mod item;
mod store;

pub use item::{Item, ItemId, ItemKind};
pub use store::PlacementStore;
