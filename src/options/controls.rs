use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Sensitivity constants for the orbit gestures.
pub struct ControlOptions {
    /// Pixels of drag per radian of rotation.
    pub rotate_divisor: f32,
    /// World units the pivot moves per pixel of pan drag.
    pub pan_speed: f32,
    /// Zoom distance multiplier per wheel event. Must be greater than 1.
    pub zoom_factor: f32,
    /// Gap kept below +90° so the camera never reaches the upper pole.
    pub pitch_margin: f32,
    /// Wheel events with a smaller absolute delta are ignored.
    pub wheel_threshold: f32,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            rotate_divisor: 180.0,
            pan_speed: 300.0,
            zoom_factor: 1.04,
            pitch_margin: 0.01,
            wheel_threshold: 1.0,
        }
    }
}
