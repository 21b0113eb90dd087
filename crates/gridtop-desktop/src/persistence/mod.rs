//! Persistence module for layout serialization
//!
//! Provides the versioned layout snapshot, the storage provider seam and
//! the save debouncer.

mod snapshot;
mod store;
mod debounce;

pub use snapshot::LayoutSnapshot;
pub use store::{LayoutStore, MemoryLayoutStore};
pub use debounce::SaveDebouncer;
