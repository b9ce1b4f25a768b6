use std::path::Path;

use image::RgbaImage;

use crate::error::OrbitViewError;

/// Face file names in cube-map layer order: +X, -X, +Y, -Y, +Z, -Z.
pub const CUBE_FACE_FILES: [&str; 6] = [
    "right.jpg",
    "left.jpg",
    "top.jpg",
    "bottom.jpg",
    "front.jpg",
    "back.jpg",
];

/// Six square, equally sized RGBA faces in cube-map layer order.
#[derive(Debug, Clone)]
pub struct CubeFaces {
    /// Edge length of every face in pixels.
    pub size: u32,
    /// Face images, +X first.
    pub faces: [RgbaImage; 6],
}

/// Decode an image file to 8-bit RGBA.
///
/// # Errors
///
/// Returns [`OrbitViewError::Texture`] if the file cannot be opened or
/// decoded.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, OrbitViewError> {
    let image = image::open(path).map_err(|e| OrbitViewError::Texture {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let rgba = image.to_rgba8();
    log::info!(
        "loaded {} ({}x{})",
        path.display(),
        rgba.width(),
        rgba.height()
    );
    Ok(rgba)
}

/// Load the six [`CUBE_FACE_FILES`] from `dir`.
///
/// # Errors
///
/// Returns [`OrbitViewError::Texture`] if any face fails to decode or the
/// faces are not square and equally sized.
pub fn load_cube_faces(dir: &Path) -> Result<CubeFaces, OrbitViewError> {
    let [right, left, top, bottom, front, back] =
        CUBE_FACE_FILES.map(|name| load_rgba(&dir.join(name)));
    CubeFaces::new([right?, left?, top?, bottom?, front?, back?])
        .map_err(|message| OrbitViewError::Texture {
            path: dir.display().to_string(),
            message,
        })
}

impl CubeFaces {
    /// Validate that all faces are square and share one size.
    ///
    /// # Errors
    ///
    /// Returns a description of the first mismatched face.
    pub fn new(faces: [RgbaImage; 6]) -> Result<Self, String> {
        let size = faces[0].width();
        if size == 0 {
            return Err("cube faces must not be empty".to_owned());
        }
        for (name, face) in CUBE_FACE_FILES.iter().zip(&faces) {
            if face.dimensions() != (size, size) {
                return Err(format!(
                    "face {name} is {}x{}, expected {size}x{size}",
                    face.width(),
                    face.height()
                ));
            }
        }
        Ok(Self { size, faces })
    }
}
