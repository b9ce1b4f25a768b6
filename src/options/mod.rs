//! Centralized viewer options with TOML file support.
//!
//! Camera projection, gesture sensitivities and presentation settings are
//! consolidated here. Options serialize to/from TOML; every section and
//! field is optional in the file.

mod camera;
mod controls;
mod display;

use std::f32::consts::PI;
use std::path::Path;

pub use camera::CameraOptions;
pub use controls::ControlOptions;
pub use display::DisplayOptions;
use serde::{Deserialize, Serialize};

use crate::error::OrbitViewError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[controls]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Gesture sensitivity constants.
    pub controls: ControlOptions,
    /// Window and scene presentation parameters.
    pub display: DisplayOptions,
}

impl Options {
    /// Parse options from TOML text and validate them.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitViewError::OptionsParse`] for malformed TOML and
    /// [`OrbitViewError::InvalidOptions`] for values that would break the
    /// camera invariants.
    pub fn from_toml(content: &str) -> Result<Self, OrbitViewError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| OrbitViewError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitViewError::Io`] if the file cannot be read, otherwise
    /// the errors of [`Options::from_toml`].
    pub fn load(path: &Path) -> Result<Self, OrbitViewError> {
        let content = std::fs::read_to_string(path)?;
        let options = Self::from_toml(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`OrbitViewError::OptionsParse`] if serialization fails and
    /// [`OrbitViewError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), OrbitViewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrbitViewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check the values the camera relies on.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitViewError::InvalidOptions`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), OrbitViewError> {
        let camera = &self.camera;
        let controls = &self.controls;
        let invalid = |msg: &str| Err(OrbitViewError::InvalidOptions(msg.to_owned()));

        if !(camera.fovy > 0.0 && camera.fovy < 180.0) {
            return invalid("camera.fovy must be in (0, 180) degrees");
        }
        if !(camera.znear > 0.0 && camera.zfar.is_finite()) {
            return invalid("camera clip planes must be positive and finite");
        }
        if !(camera.znear < camera.zfar) {
            return invalid("camera.znear must be less than camera.zfar");
        }
        if !(controls.rotate_divisor > 0.0 && controls.rotate_divisor.is_finite()) {
            return invalid("controls.rotate_divisor must be positive and finite");
        }
        if !(controls.zoom_factor > 1.0 && controls.zoom_factor.is_finite()) {
            return invalid("controls.zoom_factor must be finite and greater than 1");
        }
        if !controls.pan_speed.is_finite() {
            return invalid("controls.pan_speed must be finite");
        }
        // The pitch range [-90°, 90° - margin] must stay non-empty.
        if !(controls.pitch_margin >= 0.0 && controls.pitch_margin < PI) {
            return invalid("controls.pitch_margin must be in [0, pi)");
        }
        if !(controls.wheel_threshold >= 0.0 && controls.wheel_threshold.is_finite()) {
            return invalid("controls.wheel_threshold must be finite and not negative");
        }
        let display = &self.display;
        if !(display.skybox_scale > 0.0
            && display.skybox_scale.is_finite()
            && display.panorama_radius > 0.0
            && display.panorama_radius.is_finite())
        {
            return invalid("display scales must be positive and finite");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(Options::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[controls]
pan_speed = 2.5
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.controls.pan_speed, 2.5);
        // Everything else should be default
        assert_eq!(opts.controls.zoom_factor, 1.04);
        assert_eq!(opts.camera, CameraOptions::default());
        assert_eq!(opts.display.skybox_scale, 20.0);
    }

    #[test]
    fn zoom_factor_at_or_below_one_is_rejected() {
        let err = Options::from_toml("[controls]\nzoom_factor = 1.0\n")
            .unwrap_err();
        assert!(matches!(err, OrbitViewError::InvalidOptions(_)));
    }

    #[test]
    fn non_finite_controls_are_rejected() {
        for toml_str in [
            "[controls]\nzoom_factor = inf\n",
            "[controls]\nrotate_divisor = inf\n",
            "[controls]\nwheel_threshold = inf\n",
            "[controls]\npan_speed = nan\n",
            "[camera]\nzfar = inf\n",
            "[display]\nskybox_scale = inf\n",
        ] {
            let err = Options::from_toml(toml_str).unwrap_err();
            assert!(
                matches!(err, OrbitViewError::InvalidOptions(_)),
                "{toml_str}"
            );
        }
    }

    #[test]
    fn pitch_margin_must_leave_a_pitch_range() {
        for margin in ["-0.5", "3.2", "4.0", "inf", "nan"] {
            let toml_str = format!("[controls]\npitch_margin = {margin}\n");
            let err = Options::from_toml(&toml_str).unwrap_err();
            assert!(
                matches!(err, OrbitViewError::InvalidOptions(_)),
                "{margin}"
            );
        }
        let opts = Options::from_toml("[controls]\npitch_margin = 3.0\n")
            .unwrap();
        let mut camera = crate::camera::OrbitCamera::with_options(&opts);
        camera.rotate(0.0, 1.0);
        assert!(camera.pitch() <= FRAC_PI_2 - 3.0 + 1e-6);
    }

    #[test]
    fn validated_zoom_stays_positive_after_zoom_cycles() {
        let opts = Options::from_toml("[controls]\nzoom_factor = 1e30\n")
            .unwrap();
        let mut camera = crate::camera::OrbitCamera::with_options(&opts);
        camera.zoom_in(3.0);
        camera.zoom_in(-3.0);
        assert!(camera.zoom().is_finite() && camera.zoom() > 0.0);
    }

    #[test]
    fn inverted_clip_planes_are_rejected() {
        let err = Options::from_toml("[camera]\nznear = 10.0\nzfar = 1.0\n")
            .unwrap_err();
        assert!(matches!(err, OrbitViewError::InvalidOptions(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml("[camera\nfovy = ").unwrap_err();
        assert!(matches!(err, OrbitViewError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join("orbitview-options-test");
        let path = dir.join("view.toml");
        let mut opts = Options::default();
        opts.display.clear_color = [0.1, 0.2, 0.3];
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        let _ = std::fs::remove_dir_all(dir);
    }
}
