//! Input routing module
//!
//! Provides the item drag and resize state machines plus the event types
//! hosts feed into the engine.

mod events;
mod drag;
mod resize;
mod result;

pub use events::{Key, Modifiers};
pub use drag::{edge_direction, DragController, DragPhase, DragSession, FlipArm, PendingPress, SwapPreview};
pub use resize::{ResizeController, ResizeSession};
pub use result::InputResult;
