use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Window and scene presentation parameters.
pub struct DisplayOptions {
    /// Window title.
    pub window_title: String,
    /// Background color (linear RGB).
    pub clear_color: [f32; 3],
    /// Scale applied to the unit cube in the skybox scene.
    pub skybox_scale: f32,
    /// Scale applied to the camera-centered cube in the panorama scene.
    pub panorama_radius: f32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            window_title: "orbitview".to_owned(),
            clear_color: [0.0, 0.0, 0.0],
            skybox_scale: 20.0,
            // Keeps the cube corners at distance 100 from its center.
            panorama_radius: 100.0 / 3.0_f32.sqrt(),
        }
    }
}
