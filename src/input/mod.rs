//! Pointer input handling: event types, the gesture vocabulary, and the
//! router state machine that converts raw pointer events into gestures.

/// Platform-agnostic pointer events.
pub mod event;
/// Semantic camera gestures and the handler trait that receives them.
pub mod gesture;
/// Press/drag/release state machine.
pub mod router;

pub use event::{MouseButton, PointerEvent};
pub use gesture::{Gesture, GestureHandler};
pub use router::{DragState, PointerRouter};
