//! The demo scenes: what to draw and where its assets come from.
//!
//! Every scene draws the same unit cube ([`mesh::CUBE_VERTICES`]); they
//! differ in how it is placed and shaded:
//!
//! - [`Scene::Cube`] shades the cube by its normalized object-space position
//! - [`Scene::Skybox`] scales it up and samples a six-face cube map
//! - [`Scene::Panorama`] centers it on the eye and samples an
//!   equirectangular image by view direction

/// Image decoding for panoramas and cube-map faces.
pub mod images;
/// Static cube geometry shared by all scenes.
pub mod mesh;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use glam::Vec3;

use crate::camera::Aabb;
use crate::error::OrbitViewError;

/// Default directory searched for skybox faces.
pub const DEFAULT_SKYBOX_DIR: &str = "images/skybox";
/// Default panorama image.
pub const DEFAULT_PANORAMA: &str = "images/helipad.jpg";

/// Scene selector without asset paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    /// Position-shaded cube.
    Cube,
    /// Cube-mapped skybox.
    Skybox,
    /// Equirectangular panorama.
    Panorama,
}

/// A scene together with the assets it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scene {
    /// Position-shaded cube; no assets.
    Cube,
    /// Cube-mapped skybox.
    Skybox {
        /// Directory holding the six face images
        /// ([`images::CUBE_FACE_FILES`]).
        faces_dir: PathBuf,
    },
    /// Equirectangular panorama.
    Panorama {
        /// The panorama image.
        image: PathBuf,
    },
}

impl SceneKind {
    /// Lowercase name used on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Skybox => "skybox",
            Self::Panorama => "panorama",
        }
    }

    /// Scene of this kind reading assets from `path`, or from the default
    /// location when `None`.
    #[must_use]
    pub fn with_assets(self, path: Option<PathBuf>) -> Scene {
        match self {
            Self::Cube => Scene::Cube,
            Self::Skybox => Scene::Skybox {
                faces_dir: path.unwrap_or_else(|| DEFAULT_SKYBOX_DIR.into()),
            },
            Self::Panorama => Scene::Panorama {
                image: path.unwrap_or_else(|| DEFAULT_PANORAMA.into()),
            },
        }
    }

    /// Whether this scene kind reads an asset path.
    #[must_use]
    pub fn takes_assets(self) -> bool {
        !matches!(self, Self::Cube)
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = OrbitViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cube" | "box" => Ok(Self::Cube),
            "skybox" => Ok(Self::Skybox),
            "panorama" | "panoramic" => Ok(Self::Panorama),
            other => Err(OrbitViewError::Usage(format!(
                "unknown scene '{other}' (expected cube, skybox or panorama)"
            ))),
        }
    }
}

impl Scene {
    /// Which kind of scene this is.
    #[must_use]
    pub fn kind(&self) -> SceneKind {
        match self {
            Self::Cube => SceneKind::Cube,
            Self::Skybox { .. } => SceneKind::Skybox,
            Self::Panorama { .. } => SceneKind::Panorama,
        }
    }

    /// Box the camera frames at startup. Every scene draws the same unit
    /// cube, so one box with some margin fits them all.
    pub const FRAMING_BOUNDS: Aabb = Aabb {
        min: Vec3::splat(-2.0),
        max: Vec3::splat(2.0),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!("Cube".parse::<SceneKind>().unwrap(), SceneKind::Cube);
        assert_eq!("SKYBOX".parse::<SceneKind>().unwrap(), SceneKind::Skybox);
        assert_eq!(
            "panoramic".parse::<SceneKind>().unwrap(),
            SceneKind::Panorama
        );
    }

    #[test]
    fn unknown_kind_is_usage_error() {
        let err = "sphere".parse::<SceneKind>().unwrap_err();
        assert!(matches!(err, OrbitViewError::Usage(_)));
    }

    #[test]
    fn names_round_trip() {
        for kind in [SceneKind::Cube, SceneKind::Skybox, SceneKind::Panorama] {
            assert_eq!(kind.name().parse::<SceneKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn default_asset_locations() {
        assert_eq!(
            SceneKind::Skybox.with_assets(None),
            Scene::Skybox {
                faces_dir: PathBuf::from(DEFAULT_SKYBOX_DIR)
            }
        );
        assert_eq!(
            SceneKind::Panorama.with_assets(Some("pano.png".into())),
            Scene::Panorama {
                image: PathBuf::from("pano.png")
            }
        );
        assert_eq!(SceneKind::Cube.with_assets(None).kind(), SceneKind::Cube);
    }

    #[test]
    fn framing_box_encloses_the_cube_mesh() {
        let bounds = Scene::FRAMING_BOUNDS;
        assert_eq!(bounds.center(), Vec3::ZERO);
        for v in mesh::CUBE_VERTICES {
            let p = Vec3::from(v);
            assert!(p.cmpge(bounds.min).all() && p.cmple(bounds.max).all());
        }
    }
}
