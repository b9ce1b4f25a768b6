//! Camera system for 3D scene viewing.
//!
//! Provides an orbital camera with rotation, panning, multiplicative zoom,
//! bounding-box framing, and the GPU uniform block derived from it.

/// Axis-aligned bounding boxes used for view framing.
pub mod bounds;
/// Perspective camera parameters and GPU uniform types.
pub mod core;
/// Orbit camera: pivot, zoom distance and yaw/pitch angles.
pub mod orbit;

pub use self::bounds::Aabb;
pub use self::core::{Camera, CameraUniform};
pub use self::orbit::OrbitCamera;
