use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::{Mat4, Quat, Vec3};

use super::bounds::Aabb;
use super::core::{Camera, CameraUniform};
use crate::input::GestureHandler;
use crate::options::{ControlOptions, Options};

/// Orbital camera: a pivot point, a distance from it, and two angles.
///
/// The eye position is never set directly. [`update_position`] derives it
/// from the pivot, zoom and angles, and must run once per frame (and after
/// any gesture) before [`view_matrix`] is read.
///
/// [`update_position`]: Self::update_position
/// [`view_matrix`]: Self::view_matrix
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    camera: Camera,
    /// Rotation about world Y, radians.
    yaw: f32,
    /// Rotation about the local X axis, radians. Clamped below the poles.
    pitch: f32,
    /// Distance from target to eye. Strictly positive.
    zoom: f32,
    controls: ControlOptions,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    /// Camera with the default projection and controls, looking at
    /// `(0, 1, 0)` from distance 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            camera: Camera::default(),
            yaw: 0.0,
            pitch: 0.0,
            zoom: 1.0,
            controls: ControlOptions::default(),
        }
    }

    /// Camera configured from validated options.
    #[must_use]
    pub fn with_options(options: &Options) -> Self {
        let mut orbit = Self::new();
        orbit.camera.fovy = options.camera.fovy.to_radians();
        orbit.camera.znear = options.camera.znear;
        orbit.camera.zfar = options.camera.zfar;
        orbit.controls = options.controls;
        orbit
    }

    /// Underlying perspective camera (eye as of the last update).
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Eye position as of the last [`update_position`](Self::update_position).
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.camera.eye
    }

    /// Orbit pivot.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.camera.target
    }

    /// Move the orbit pivot.
    pub fn set_target(&mut self, target: Vec3) {
        self.camera.target = target;
    }

    /// Distance from target to eye.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the distance from target to eye. Non-positive or non-finite
    /// values are ignored.
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom > 0.0 && zoom.is_finite() {
            self.zoom = zoom;
        } else {
            log::debug!("ignoring zoom distance {zoom}");
        }
    }

    /// Yaw angle in radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch angle in radians.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set both angles; pitch is clamped like a rotate gesture.
    pub fn set_angles(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = self.clamp_pitch(pitch);
    }

    /// Vertical field of view in radians.
    #[must_use]
    pub fn fovy(&self) -> f32 {
        self.camera.fovy
    }

    /// Viewport aspect ratio.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.camera.aspect
    }

    /// Gesture sensitivities in use.
    #[must_use]
    pub fn controls(&self) -> &ControlOptions {
        &self.controls
    }

    /// Update the aspect ratio from viewport dimensions. Ignores a zero
    /// height (minimized window).
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Rotation taking the canonical forward `(0, 0, 1)` onto the orbit
    /// direction: pitch about X first, then yaw about Y, both negated.
    fn orbit_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw) * Quat::from_rotation_x(-self.pitch)
    }

    /// Unit vector from target towards the eye.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.orbit_rotation() * Vec3::Z
    }

    /// Recompute the eye position from target, zoom and angles.
    pub fn update_position(&mut self) {
        self.camera.eye = self.camera.target + self.direction() * self.zoom;
    }

    /// World-to-camera transform. Call
    /// [`update_position`](Self::update_position) first in the frame.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    /// Perspective projection for wgpu (`[0, 1]` depth).
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.camera.projection_matrix()
    }

    /// Perspective projection for OpenGL/WebGL (`[-1, 1]` depth).
    #[must_use]
    pub fn projection_matrix_gl(&self) -> Mat4 {
        self.camera.projection_matrix_gl()
    }

    /// Combined projection * view.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.camera.build_matrix()
    }

    /// GPU uniform block for the current state.
    #[must_use]
    pub fn camera_uniform(&self) -> CameraUniform {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&self.camera);
        uniform
    }

    /// Upper bound wins when an unvalidated margin inverts the range.
    fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch
            .max(-FRAC_PI_2)
            .min(FRAC_PI_2 - self.controls.pitch_margin)
    }

    /// Rotate by a drag delta in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx / self.controls.rotate_divisor;
        self.pitch = self.clamp_pitch(
            self.pitch + dy / self.controls.rotate_divisor,
        );
    }

    /// Move the pivot by a drag delta in pixels.
    ///
    /// The sideways axis follows yaw and pitch, while the forward axis
    /// follows yaw only, so vertical drags slide the pivot across the
    /// ground plane regardless of elevation.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let speed = self.controls.pan_speed;
        let left = self.orbit_rotation() * Vec3::NEG_X * (dx * speed);
        let up = Quat::from_rotation_y(-self.yaw) * Vec3::NEG_Z * (dy * speed);
        self.camera.target += up + left;
    }

    /// Zoom out for a positive wheel delta, in otherwise.
    pub fn zoom_in(&mut self, delta: f32) {
        if delta > 0.0 {
            self.zoom *= self.controls.zoom_factor;
        } else {
            self.zoom /= self.controls.zoom_factor;
        }
    }

    /// Center on `bounds` and back off until its larger planar (X/Y)
    /// extent fits both fields of view. Z extent is ignored, so the fit is
    /// approximate. Yaw is reset to 45°.
    pub fn fit_view_to_scene(&mut self, bounds: &Aabb) {
        self.camera.target = bounds.center();
        self.yaw = FRAC_PI_4;

        let extent = bounds.extent();
        let max_axis_length = extent.x.max(extent.y);

        let yfov = self.camera.fovy;
        let xfov = yfov * self.camera.aspect;
        let y_zoom = max_axis_length / 2.0 / (yfov / 2.0).tan();
        let x_zoom = max_axis_length / 2.0 / (xfov / 2.0).tan();

        self.set_zoom(x_zoom.max(y_zoom));
        log::debug!(
            "framed {:?}..{:?}: target {}, zoom {}",
            bounds.min,
            bounds.max,
            self.camera.target,
            self.zoom
        );
    }

    /// Frame a point cloud. No-op for an empty slice.
    pub fn fit_to_positions(&mut self, positions: &[Vec3]) {
        if let Some(bounds) = Aabb::from_points(positions.iter().copied()) {
            self.fit_view_to_scene(&bounds);
        }
    }
}

impl GestureHandler for OrbitCamera {
    fn on_rotate(&mut self, dx: f32, dy: f32) {
        self.rotate(dx, dy);
    }

    fn on_pan(&mut self, dx: f32, dy: f32) {
        self.pan(dx, dy);
    }

    fn on_zoom(&mut self, delta: f32) {
        self.zoom_in(delta);
    }

    fn on_click(&mut self, x: f32, y: f32) {
        log::debug!("click at ({x}, {y})");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_vec_eq(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).length() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn pitch_max() -> f32 {
        FRAC_PI_2 - 0.01
    }

    #[test]
    fn defaults_match_reference_camera() {
        let camera = OrbitCamera::new();
        assert_eq!(camera.target(), Vec3::Y);
        assert_eq!(camera.position(), Vec3::ZERO);
        assert_eq!(camera.zoom(), 1.0);
        assert!((camera.fovy() - 45.0_f32.to_radians()).abs() < EPS);
        assert!((camera.aspect() - 16.0 / 9.0).abs() < EPS);
        assert_eq!(camera.camera().znear, 0.1);
        assert_eq!(camera.camera().zfar, 100.0);
    }

    #[test]
    fn rotate_scales_by_180_pixels_per_radian() {
        let mut camera = OrbitCamera::new();
        camera.rotate(90.0, -45.0);
        assert!((camera.yaw() - 0.5).abs() < EPS);
        assert!((camera.pitch() + 0.25).abs() < EPS);
    }

    #[test]
    fn pitch_stays_clamped_under_extreme_input() {
        let mut camera = OrbitCamera::new();
        for dy in [1e6, -1e6, 3.0e4, 1.0, -7.5e5, 1e9] {
            camera.rotate(0.0, dy);
            assert!(camera.pitch() >= -FRAC_PI_2);
            assert!(camera.pitch() <= pitch_max());
        }
        camera.rotate(0.0, 1e9);
        assert_eq!(camera.pitch(), pitch_max());
        camera.rotate(0.0, -1e9);
        assert_eq!(camera.pitch(), -FRAC_PI_2);
    }

    #[test]
    fn zoom_is_multiplicative_and_stays_positive() {
        let mut camera = OrbitCamera::new();
        camera.set_zoom(2.0);

        camera.zoom_in(3.0);
        assert_eq!(camera.zoom(), 2.0 * 1.04);

        camera.zoom_in(-3.0);
        camera.zoom_in(-3.0);
        assert!((camera.zoom() - 2.0 / 1.04).abs() < EPS);

        for _ in 0..1_000 {
            camera.zoom_in(-120.0);
            assert!(camera.zoom() > 0.0);
        }
    }

    #[test]
    fn zero_wheel_delta_zooms_in() {
        let mut camera = OrbitCamera::new();
        camera.zoom_in(0.0);
        assert_eq!(camera.zoom(), 1.0 / 1.04);
    }

    #[test]
    fn set_zoom_rejects_non_positive() {
        let mut camera = OrbitCamera::new();
        camera.set_zoom(0.0);
        camera.set_zoom(-4.0);
        camera.set_zoom(f32::NAN);
        assert_eq!(camera.zoom(), 1.0);
    }

    #[test]
    fn position_at_rest_is_along_positive_z() {
        let mut camera = OrbitCamera::new();
        camera.set_target(Vec3::ZERO);
        camera.set_zoom(5.0);
        camera.set_angles(0.0, 0.0);
        camera.update_position();
        assert_vec_eq(camera.position(), Vec3::new(0.0, 0.0, 5.0));
        assert!((camera.position().distance(camera.target()) - 5.0).abs() < EPS);
    }

    #[test]
    fn position_follows_yaw_then_pitch_rotation() {
        let (yaw, pitch) = (0.7_f32, -0.4_f32);
        let mut camera = OrbitCamera::new();
        camera.set_target(Vec3::new(1.0, 2.0, 3.0));
        camera.set_zoom(5.0);
        camera.set_angles(yaw, pitch);
        camera.update_position();

        // RotY(-yaw) * RotX(-pitch) * (0, 0, 1), written out by hand.
        let expected_dir = Vec3::new(
            -pitch.cos() * yaw.sin(),
            pitch.sin(),
            pitch.cos() * yaw.cos(),
        );
        assert_vec_eq(
            camera.position(),
            Vec3::new(1.0, 2.0, 3.0) + expected_dir * 5.0,
        );
        assert!((camera.position().distance(camera.target()) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn matrices_are_deterministic() {
        let mut camera = OrbitCamera::new();
        camera.rotate(33.0, 12.0);
        camera.pan(0.01, -0.02);
        camera.update_position();
        let (view, proj) = (camera.view_matrix(), camera.projection_matrix());
        camera.update_position();
        assert_eq!(camera.view_matrix(), view);
        assert_eq!(camera.projection_matrix(), proj);
    }

    #[test]
    fn view_matrix_centers_target() {
        let mut camera = OrbitCamera::new();
        camera.set_target(Vec3::new(4.0, -1.0, 2.0));
        camera.set_zoom(10.0);
        camera.set_angles(1.1, 0.6);
        camera.update_position();
        let p = camera.view_matrix().transform_point3(camera.target());
        assert!(p.x.abs() < 1e-4 && p.y.abs() < 1e-4);
        assert!((p.z + 10.0).abs() < 1e-4);
    }

    #[test]
    fn fit_view_to_scene_frames_box() {
        let mut camera = OrbitCamera::new();
        camera.resize(1600, 900);
        camera.fit_view_to_scene(&Aabb::new(Vec3::splat(-2.0), Vec3::splat(2.0)));

        assert_vec_eq(camera.target(), Vec3::ZERO);
        assert!((camera.yaw() - FRAC_PI_4).abs() < EPS);

        let yfov = 45.0_f32.to_radians();
        let xfov = yfov * 16.0 / 9.0;
        let y_zoom = 4.0 / 2.0 / (yfov / 2.0).tan();
        let x_zoom = 4.0 / 2.0 / (xfov / 2.0).tan();
        assert!((camera.zoom() - y_zoom.max(x_zoom)).abs() < EPS);
        assert!((camera.zoom() - 4.828_427).abs() < 1e-4);
    }

    #[test]
    fn fit_view_ignores_depth_extent() {
        let mut shallow = OrbitCamera::new();
        shallow.fit_view_to_scene(&Aabb::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
        ));
        let mut deep = OrbitCamera::new();
        deep.fit_view_to_scene(&Aabb::new(
            Vec3::new(-1.0, -1.0, -500.0),
            Vec3::new(1.0, 1.0, 500.0),
        ));
        assert_eq!(shallow.zoom(), deep.zoom());
    }

    #[test]
    fn fit_view_default_box_is_far_away() {
        let mut camera = OrbitCamera::new();
        camera.fit_view_to_scene(&Aabb::default());
        assert_vec_eq(camera.target(), Vec3::ZERO);
        assert!(camera.zoom() > 10_000.0);
    }

    #[test]
    fn fit_to_positions_uses_their_bounds() {
        let mut camera = OrbitCamera::new();
        camera.fit_to_positions(&[Vec3::new(2.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 0.0)]);
        assert_vec_eq(camera.target(), Vec3::new(3.0, 1.0, 0.0));

        let before = camera.zoom();
        camera.fit_to_positions(&[]);
        assert_eq!(camera.zoom(), before);
    }

    #[test]
    fn pan_moves_pivot_not_eye_directly() {
        let mut camera = OrbitCamera::new();
        camera.set_target(Vec3::ZERO);
        camera.update_position();
        let eye = camera.position();

        camera.pan(0.01, 0.0);
        assert_vec_eq(camera.target(), Vec3::new(-3.0, 0.0, 0.0));
        assert_eq!(camera.position(), eye);

        camera.update_position();
        assert_vec_eq(camera.position() - camera.target(), eye);
    }

    #[test]
    fn pan_forward_axis_ignores_pitch() {
        // Known quirk: only yaw orients the vertical pan axis, so pitching
        // the camera never lifts the pivot off the ground plane.
        let mut level = OrbitCamera::new();
        level.set_target(Vec3::ZERO);
        let mut tilted = level.clone();
        tilted.set_angles(0.0, 1.2);

        level.pan(0.0, 1.0);
        tilted.pan(0.0, 1.0);
        assert_vec_eq(level.target(), Vec3::new(0.0, 0.0, -300.0));
        assert_vec_eq(tilted.target(), level.target());
    }

    #[test]
    fn pan_axes_follow_yaw() {
        let mut camera = OrbitCamera::new();
        camera.set_target(Vec3::ZERO);
        camera.set_angles(FRAC_PI_2, 0.0);

        camera.pan(1.0, 0.0);
        assert!((camera.target() - Vec3::new(0.0, 0.0, -300.0)).length() < 1e-3);

        camera.set_target(Vec3::ZERO);
        camera.pan(0.0, 1.0);
        assert!((camera.target() - Vec3::new(300.0, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn options_configure_projection_and_controls() {
        let mut options = Options::default();
        options.camera.fovy = 60.0;
        options.camera.zfar = 500.0;
        options.controls.rotate_divisor = 90.0;
        let mut camera = OrbitCamera::with_options(&options);

        assert!((camera.fovy() - 60.0_f32.to_radians()).abs() < EPS);
        assert_eq!(camera.camera().zfar, 500.0);
        camera.rotate(90.0, 0.0);
        assert!((camera.yaw() - 1.0).abs() < EPS);
    }

    #[test]
    fn oversized_pitch_margin_does_not_panic() {
        let mut options = Options::default();
        options.controls.pitch_margin = 4.0;
        let mut camera = OrbitCamera::with_options(&options);
        camera.rotate(0.0, 1.0);
        assert!((camera.pitch() - (FRAC_PI_2 - 4.0)).abs() < EPS);
    }

    #[test]
    fn resize_ignores_zero_height() {
        let mut camera = OrbitCamera::new();
        camera.resize(800, 0);
        assert!((camera.aspect() - 16.0 / 9.0).abs() < EPS);
        camera.resize(800, 400);
        assert_eq!(camera.aspect(), 2.0);
    }

    #[test]
    fn gestures_drive_camera() {
        let mut camera = OrbitCamera::new();
        crate::input::Gesture::Rotate { dx: 180.0, dy: 0.0 }.apply(&mut camera);
        crate::input::Gesture::Zoom { delta: 5.0 }.apply(&mut camera);
        crate::input::Gesture::Click { x: 1.0, y: 1.0 }.apply(&mut camera);
        assert!((camera.yaw() - 1.0).abs() < EPS);
        assert_eq!(camera.zoom(), 1.04);
    }

    #[test]
    fn uniform_carries_eye() {
        let mut camera = OrbitCamera::new();
        camera.update_position();
        let uniform = camera.camera_uniform();
        assert_eq!(uniform.position, camera.position().to_array());
        assert_eq!(
            uniform.view_proj,
            camera.view_projection().to_cols_array_2d()
        );
    }
}
