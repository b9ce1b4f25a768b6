//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, depth and sampled textures,
//! and the bind-group/pipeline boilerplate shared by the scene renderer.

/// Bind group layout entries, samplers and mesh pipeline construction.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachments and image-backed sampled textures.
pub mod texture;
