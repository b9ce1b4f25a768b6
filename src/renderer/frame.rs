use glam::{Mat4, Vec3};

use crate::camera::{CameraUniform, OrbitCamera};
use crate::options::DisplayOptions;
use crate::scene::Scene;

/// Per-frame camera output consumed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    /// World-to-view transform.
    pub view: Mat4,
    /// View-to-clip transform.
    pub projection: Mat4,
    /// Eye position in world space.
    pub eye: Vec3,
}

impl FrameMatrices {
    /// Snapshot the camera. Call after [`OrbitCamera::update_position`].
    #[must_use]
    pub fn from_camera(camera: &OrbitCamera) -> Self {
        Self {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            eye: camera.position(),
        }
    }

    /// Pack into the shader's camera block.
    #[must_use]
    pub fn uniform(&self, aspect: f32) -> CameraUniform {
        CameraUniform {
            view_proj: (self.projection * self.view).to_cols_array_2d(),
            position: self.eye.to_array(),
            aspect,
        }
    }
}

/// How the unit cube is placed for a scene.
///
/// Layout matches `MeshUniform` in `mesh.wgsl` (16 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniform {
    /// Uniform scale applied to the cube.
    pub scale: f32,
    /// Non-zero to translate the cube to the eye position.
    pub follow_camera: u32,
    _pad: [u32; 2],
}

impl MeshUniform {
    /// Placement for `scene` under the given display settings.
    #[must_use]
    pub fn for_scene(scene: &Scene, display: &DisplayOptions) -> Self {
        let (scale, follow_camera) = match scene {
            Scene::Cube => (1.0, false),
            Scene::Skybox { .. } => (display.skybox_scale, false),
            Scene::Panorama { .. } => (display.panorama_radius, true),
        };
        Self {
            scale,
            follow_camera: u32::from(follow_camera),
            _pad: [0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn uniform_sizes_match_wgsl() {
        assert_eq!(size_of::<MeshUniform>(), 16);
        assert_eq!(size_of::<CameraUniform>(), 80);
    }

    #[test]
    fn panorama_follows_camera() {
        let display = DisplayOptions::default();
        let pano = MeshUniform::for_scene(
            &Scene::Panorama {
                image: PathBuf::from("pano.jpg"),
            },
            &display,
        );
        assert_eq!(pano.follow_camera, 1);
        assert!((pano.scale - display.panorama_radius).abs() < 1e-6);

        let sky = MeshUniform::for_scene(
            &Scene::Skybox {
                faces_dir: PathBuf::from("sky"),
            },
            &display,
        );
        assert_eq!(sky.follow_camera, 0);
        assert!((sky.scale - 20.0).abs() < 1e-6);

        let cube = MeshUniform::for_scene(&Scene::Cube, &display);
        assert_eq!(cube.follow_camera, 0);
        assert!((cube.scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn frame_uniform_is_projection_times_view() {
        let mut camera = OrbitCamera::new();
        camera.update_position();
        let frame = FrameMatrices::from_camera(&camera);
        let uniform = frame.uniform(1.5);

        let expected = camera.view_projection().to_cols_array_2d();
        for (col, expected_col) in uniform.view_proj.iter().zip(&expected) {
            for (a, b) in col.iter().zip(expected_col) {
                assert!((a - b).abs() < 1e-5, "{a} vs {b}");
            }
        }
        assert_eq!(uniform.position, camera.position().to_array());
        assert!((uniform.aspect - 1.5).abs() < 1e-6);
    }
}
