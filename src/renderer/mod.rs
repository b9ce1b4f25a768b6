//! wgpu backend for the demo scenes.
//!
//! A [`SceneRenderer`] owns one pipeline, its uniform buffers and the
//! scene's texture. Each frame it is handed a [`FrameMatrices`] built from
//! the camera and draws the shared cube mesh with it.

mod frame;
mod scene_renderer;
pub mod shaders;

pub use frame::{FrameMatrices, MeshUniform};
pub use scene_renderer::SceneRenderer;
