//! Spatial layout and navigation engine for a grid desktop
//!
//! This crate provides the core of a home-screen style desktop:
//! - Responsive grid metrics (columns, cell size, canvas insets)
//! - Collision-free tile placement with auto-layout of unplaced items
//! - A 2-D map of pages with lazy page creation on navigation
//! - Long-press and modifier drag with swap preview, edge flips and trash
//! - Live widget resize that never overlaps a neighbour
//! - Keyboard, wheel, swipe and page-drag navigation
//! - Debounced persistence through a pluggable store
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`math`]: Pixel geometry (`Vec2`, `Size`, `Rect`) and grid cells (`GridPos`, `Footprint`, `GridRect`)
//! - [`grid`]: Grid metrics and the slot allocator
//! - [`item`]: Items and the placement store
//! - [`page`]: Page map, navigator and background page drag
//! - [`input`]: Event types and the drag/resize state machines
//! - [`timer`]: Cancellable timers driven by injected time
//! - [`transition`]: Page snap animation
//! - [`persistence`]: Layout snapshots, storage seam and save debouncing
//!
//! ## Example
//!
//! ```rust
//! use gridtop_desktop::{DesktopConfig, DesktopSurface, Item, ItemKind};
//!
//! let mut surface = DesktopSurface::new(DesktopConfig::default());
//! surface.init(1280.0, 800.0);
//! surface.hydrate(None, 0.0);
//!
//! assert!(surface.add_item(Item::new("notes", ItemKind::App), 0.0));
//! let model = surface.render(0.0);
//! assert_eq!(model.active_page, 0);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All state management is pure Rust, testable without a browser
//! 2. **Time Abstraction**: Timers and animations take `now_ms`, so tests never wait
//! 3. **One Owner**: `DesktopSurface` owns every piece of desktop state
//! 4. **Minimal Dependencies**: Browser bindings only behind the `wasm` feature

pub mod config;
pub mod error;
pub mod math;
pub mod grid;
pub mod item;
pub mod page;
pub mod input;
pub mod timer;
pub mod transition;
pub mod persistence;

mod engine;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use config::{DesktopConfig, GestureConfig, GridConfig, NavigationConfig};
pub use error::{DesktopError, Result};
pub use math::{Footprint, GridPos, GridRect, Rect, Size, Vec2};
pub use grid::{CanvasInsets, Edge, GridMetrics, LayoutOverrides, SlotAllocator};
pub use item::{Item, ItemId, ItemKind, PlacementStore};
pub use page::{
    CreatePolicy, Direction, NavOutcome, PageConfig, PageCoord, PageGraph, PageId, PageNavigator,
    HOME_PAGE,
};
pub use input::{DragController, DragPhase, InputResult, Key, Modifiers, ResizeController};
pub use timer::{TimerId, TimerKind, TimerQueue};
pub use persistence::{LayoutSnapshot, LayoutStore, MemoryLayoutStore, SaveDebouncer};

pub use engine::{default_items, DesktopSurface, GhostView, ItemView, NavBlockers, PageView, RenderModel};
