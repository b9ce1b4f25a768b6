// -- Lint policy ---------------------------------------------------------
// Lint groups live in the workspace manifest; these are the crate-local
// additions.

// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]

//! Orbit camera, pointer gesture routing and small wgpu demo scenes.
//!
//! The crate is split into a pure core and a rendering shell:
//!
//! - [`camera::OrbitCamera`] - pivot/zoom/yaw/pitch camera that derives its
//!   eye position, view matrix and projection matrix every frame
//! - [`input::PointerRouter`] - press/move/release/wheel state machine that
//!   turns raw pointer events into [`input::Gesture`]s
//! - [`options::Options`] - TOML-backed camera, control and display settings
//! - [`scene`] - the three demo scenes (cube, skybox, panorama), the shared
//!   cube mesh and image decoding
//! - [`renderer::SceneRenderer`] - the wgpu backend that draws a scene from
//!   a view and a projection matrix
//!
//! With the `viewer` feature, [`viewer::Viewer`] opens a winit window that
//! owns one camera and one router and drives them from window events.
//!
//! ```
//! use orbitview::camera::{Aabb, OrbitCamera};
//! use orbitview::input::{MouseButton, PointerEvent, PointerRouter};
//!
//! let mut camera = OrbitCamera::new();
//! camera.fit_view_to_scene(&Aabb::new([-2.0; 3].into(), [2.0; 3].into()));
//!
//! let mut router = PointerRouter::new();
//! router.dispatch(
//!     PointerEvent::Press { x: 10.0, y: 10.0, button: MouseButton::Left },
//!     &mut camera,
//! );
//! router.dispatch(PointerEvent::Move { x: 40.0, y: 10.0 }, &mut camera);
//!
//! camera.update_position();
//! let view_proj = camera.projection_matrix() * camera.view_matrix();
//! # let _ = view_proj;
//! ```

pub mod camera;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use camera::OrbitCamera;
pub use error::OrbitViewError;
pub use input::{Gesture, GestureHandler, PointerEvent, PointerRouter};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
