/// Platform-agnostic pointer events.
///
/// These are fed into a [`PointerRouter`](super::PointerRouter), which
/// converts them into [`Gesture`](super::Gesture) values. Coordinates are
/// window-relative pixels; events must arrive one at a time in
/// chronological order.
///
/// # Example
///
/// ```
/// use orbitview::input::{Gesture, MouseButton, PointerEvent, PointerRouter};
///
/// let mut router = PointerRouter::new();
/// let _ = router.handle_event(PointerEvent::Press {
///     x: 100.0,
///     y: 100.0,
///     button: MouseButton::Left,
/// });
/// let gesture = router.handle_event(PointerEvent::Move { x: 110.0, y: 95.0 });
/// assert_eq!(gesture, Some(Gesture::Rotate { dx: 10.0, dy: -5.0 }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A mouse button went down.
    Press {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
        /// Which button went down.
        button: MouseButton,
    },
    /// The cursor moved to an absolute position.
    Move {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// A mouse button went up.
    Release {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Scroll wheel, DOM convention: positive scrolls towards the user.
    Wheel {
        /// Vertical scroll amount in pixels.
        delta_y: f32,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button, DOM index 0.
    Left,
    /// Middle mouse button (wheel click), DOM index 1.
    Middle,
    /// Secondary (right) mouse button, DOM index 2.
    Right,
    /// Any other button, by DOM index.
    Other(u16),
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` index.
    #[must_use]
    pub fn from_index(index: u16) -> Self {
        match index {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            n => Self::Other(n),
        }
    }

    /// DOM `MouseEvent.button` index.
    #[must_use]
    pub fn index(self) -> u16 {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
            Self::Other(n) => n,
        }
    }
}

/// Pixels reported per scrolled line, matching what browsers report for one
/// wheel notch.
#[cfg(feature = "viewer")]
pub const PIXELS_PER_LINE: f32 = 100.0;

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Left,
            winit::event::MouseButton::Middle => Self::Middle,
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Back => Self::Other(3),
            winit::event::MouseButton::Forward => Self::Other(4),
            winit::event::MouseButton::Other(n) => Self::Other(n),
        }
    }
}

#[cfg(feature = "viewer")]
impl PointerEvent {
    /// Convert a winit scroll delta into a DOM-style wheel event.
    ///
    /// winit reports positive values when scrolling away from the user, the
    /// DOM the opposite, so the sign is flipped.
    #[must_use]
    pub fn from_scroll(delta: winit::event::MouseScrollDelta) -> Self {
        let delta_y = match delta {
            winit::event::MouseScrollDelta::LineDelta(_, y) => -y * PIXELS_PER_LINE,
            winit::event::MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32),
        };
        Self::Wheel { delta_y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_indices_map_both_ways() {
        for index in 0..6 {
            assert_eq!(MouseButton::from_index(index).index(), index);
        }
        assert_eq!(MouseButton::from_index(0), MouseButton::Left);
        assert_eq!(MouseButton::from_index(2), MouseButton::Right);
        assert_eq!(MouseButton::from_index(4), MouseButton::Other(4));
    }

    #[cfg(feature = "viewer")]
    #[test]
    fn scrolling_away_from_user_is_negative() {
        let event = PointerEvent::from_scroll(
            winit::event::MouseScrollDelta::LineDelta(0.0, 1.0),
        );
        assert_eq!(event, PointerEvent::Wheel { delta_y: -PIXELS_PER_LINE });
    }
}
