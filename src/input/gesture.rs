/// A semantic interaction derived from raw pointer events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Primary-button drag, in pixels since the previous move.
    Rotate {
        /// Horizontal delta.
        dx: f32,
        /// Vertical delta.
        dy: f32,
    },
    /// Secondary-button drag, in pixels since the previous move.
    Pan {
        /// Horizontal delta.
        dx: f32,
        /// Vertical delta.
        dy: f32,
    },
    /// Wheel scroll; positive scrolls towards the user (zoom out).
    Zoom {
        /// Vertical scroll delta.
        delta: f32,
    },
    /// Press and release at exactly the same position.
    Click {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
}

/// Receiver of gestures, implemented by whatever owns the camera.
///
/// Calls are synchronous and happen inside the event handler that produced
/// the gesture, so implementations should return quickly.
pub trait GestureHandler {
    /// Rotate by a drag delta.
    fn on_rotate(&mut self, dx: f32, dy: f32);
    /// Pan by a drag delta.
    fn on_pan(&mut self, dx: f32, dy: f32);
    /// Zoom by a wheel delta.
    fn on_zoom(&mut self, delta: f32);
    /// Click without movement. Ignored unless overridden.
    fn on_click(&mut self, _x: f32, _y: f32) {}
}

impl Gesture {
    /// Invoke the matching callback on `handler`.
    pub fn apply<H: GestureHandler + ?Sized>(self, handler: &mut H) {
        match self {
            Self::Rotate { dx, dy } => handler.on_rotate(dx, dy),
            Self::Pan { dx, dy } => handler.on_pan(dx, dy),
            Self::Zoom { delta } => handler.on_zoom(delta),
            Self::Click { x, y } => handler.on_click(x, y),
        }
    }
}
