//! Converts raw pointer events into camera gestures.
//!
//! The `PointerRouter` owns the transient drag state: which button is held,
//! where the press happened, and where the cursor was last seen. It is the
//! only thing between the window's pointer events and the camera's
//! [`GestureHandler`] implementation.

use glam::Vec2;

use super::event::{MouseButton, PointerEvent};
use super::gesture::{Gesture, GestureHandler};
use crate::options::ControlOptions;

/// Router state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// No button held; moves are ignored.
    Idle,
    /// A button is held.
    Dragging {
        /// Button that started the drag.
        button: MouseButton,
        /// Last observed cursor position, for per-event deltas.
        last: Vec2,
        /// Cursor position at press time, for click detection.
        origin: Vec2,
    },
}

/// Press/move/release/wheel state machine producing [`Gesture`]s.
///
/// - primary drag rotates, secondary drag pans, other buttons only track
/// - release at exactly the press position is a click (no tolerance)
/// - wheel events below the threshold are dropped as noise
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// router.dispatch(event, &mut camera);
/// ```
#[derive(Debug, Clone)]
pub struct PointerRouter {
    state: DragState,
    wheel_threshold: f32,
}

impl PointerRouter {
    /// Create an idle router with the default wheel threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::with_controls(&ControlOptions::default())
    }

    /// Create an idle router using the configured wheel threshold.
    #[must_use]
    pub fn with_controls(controls: &ControlOptions) -> Self {
        Self {
            state: DragState::Idle,
            wheel_threshold: controls.wheel_threshold,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether a button is held.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Button held for the current drag, if any.
    #[must_use]
    pub fn active_button(&self) -> Option<MouseButton> {
        match self.state {
            DragState::Dragging { button, .. } => Some(button),
            DragState::Idle => None,
        }
    }

    /// Drop any drag in progress without producing a click, e.g. when the
    /// window loses focus mid-drag.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Process one event and return the gesture it produces, if any.
    pub fn handle_event(&mut self, event: PointerEvent) -> Option<Gesture> {
        match event {
            PointerEvent::Press { x, y, button } => {
                self.handle_press(Vec2::new(x, y), button);
                None
            }
            PointerEvent::Move { x, y } => self.handle_move(Vec2::new(x, y)),
            PointerEvent::Release { x, y } => {
                self.handle_release(Vec2::new(x, y))
            }
            PointerEvent::Wheel { delta_y } => self.handle_wheel(delta_y),
        }
    }

    /// Process one event and apply the resulting gesture to `handler`.
    pub fn dispatch<H: GestureHandler + ?Sized>(
        &mut self,
        event: PointerEvent,
        handler: &mut H,
    ) {
        if let Some(gesture) = self.handle_event(event) {
            gesture.apply(handler);
        }
    }

    /// A press always (re)starts a drag, even if one is in progress.
    fn handle_press(&mut self, pos: Vec2, button: MouseButton) {
        log::debug!("pointer press {button:?} at {pos}");
        self.state = DragState::Dragging {
            button,
            last: pos,
            origin: pos,
        };
    }

    fn handle_move(&mut self, pos: Vec2) -> Option<Gesture> {
        let DragState::Dragging { button, last, .. } = &mut self.state else {
            return None;
        };

        let delta = pos - *last;
        *last = pos;

        match button {
            MouseButton::Left => Some(Gesture::Rotate {
                dx: delta.x,
                dy: delta.y,
            }),
            MouseButton::Right => Some(Gesture::Pan {
                dx: delta.x,
                dy: delta.y,
            }),
            MouseButton::Middle | MouseButton::Other(_) => None,
        }
    }

    fn handle_release(&mut self, pos: Vec2) -> Option<Gesture> {
        let DragState::Dragging { origin, .. } = self.state else {
            return None;
        };
        self.state = DragState::Idle;
        log::debug!("pointer release at {pos}");

        (pos == origin).then_some(Gesture::Click { x: pos.x, y: pos.y })
    }

    fn handle_wheel(&self, delta_y: f32) -> Option<Gesture> {
        (delta_y.abs() >= self.wheel_threshold)
            .then_some(Gesture::Zoom { delta: delta_y })
    }
}

impl Default for PointerRouter {
    fn default() -> Self {
        Self::new()
    }
}
