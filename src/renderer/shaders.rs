//! WGSL sources for the scene pipelines.
//!
//! Every scene shares the vertex stage in `mesh.wgsl`; the fragment stage
//! is appended per scene.

use crate::scene::SceneKind;

const MESH_VERTEX: &str = include_str!("../../assets/shaders/mesh.wgsl");
const CUBE_FRAGMENT: &str = include_str!("../../assets/shaders/cube.wgsl");
const SKYBOX_FRAGMENT: &str =
    include_str!("../../assets/shaders/skybox.wgsl");
const PANORAMA_FRAGMENT: &str =
    include_str!("../../assets/shaders/panorama.wgsl");

/// Full WGSL module for `kind`.
#[must_use]
pub fn shader_source(kind: SceneKind) -> String {
    let fragment = match kind {
        SceneKind::Cube => CUBE_FRAGMENT,
        SceneKind::Skybox => SKYBOX_FRAGMENT,
        SceneKind::Panorama => PANORAMA_FRAGMENT,
    };
    format!("{MESH_VERTEX}\n{fragment}")
}

/// View dimension of the texture bound at binding 2, or `None` for
/// scenes without one.
#[must_use]
pub fn texture_dimension(kind: SceneKind) -> Option<wgpu::TextureViewDimension> {
    match kind {
        SceneKind::Cube => None,
        SceneKind::Skybox => Some(wgpu::TextureViewDimension::Cube),
        SceneKind::Panorama => Some(wgpu::TextureViewDimension::D2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [SceneKind; 3] =
        [SceneKind::Cube, SceneKind::Skybox, SceneKind::Panorama];

    #[test]
    fn every_scene_has_both_entry_points() {
        for kind in KINDS {
            let source = shader_source(kind);
            assert_eq!(source.matches("fn vs_main").count(), 1, "{kind}");
            assert_eq!(source.matches("fn fs_main").count(), 1, "{kind}");
        }
    }

    #[test]
    fn texture_binding_matches_dimension() {
        for kind in KINDS {
            let source = shader_source(kind);
            let binds_texture = source.contains("@binding(2)");
            assert_eq!(binds_texture, texture_dimension(kind).is_some());
        }
        assert!(shader_source(SceneKind::Skybox).contains("texture_cube"));
        assert!(shader_source(SceneKind::Panorama).contains("texture_2d"));
    }
}
