//! Orbit camera: yaw/pitch/distance around the origin.

use glam::{Mat4, Vec2, Vec3};
use orrery_config::CameraConfig;

/// Wrap an angle in degrees into [0, 360).
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// A camera orbiting the world origin, driven by pointer motion and scroll.
///
/// Angles are stored in degrees. Pitch is clamped strictly inside ±90° so
/// the fixed +Y up vector never becomes parallel to the view direction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    yaw: f32,
    pitch: f32,
    distance: f32,
    min_distance: f32,
    max_distance: f32,
    sensitivity: f32,
    zoom_step: f32,
    /// Vertical field of view in radians.
    fov_y: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
}

impl OrbitCamera {
    /// Pitch limit in degrees.
    pub const PITCH_LIMIT: f32 = 89.0;

    pub fn from_config(config: &CameraConfig) -> Self {
        let (min_distance, max_distance) = if config.min_distance <= config.max_distance {
            (config.min_distance, config.max_distance)
        } else {
            (config.max_distance, config.min_distance)
        };
        Self {
            yaw: wrap_degrees(config.yaw_degrees),
            pitch: config
                .pitch_degrees
                .clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT),
            distance: config.distance.clamp(min_distance, max_distance),
            min_distance,
            max_distance,
            sensitivity: config.sensitivity,
            zoom_step: config.zoom_step,
            fov_y: config.fov_degrees.to_radians(),
            aspect_ratio: 1.0,
            near: config.near,
            far: config.far,
        }
    }

    /// Apply one frame of input.
    ///
    /// `pointer_delta` is in pixels, +y pointing down the screen. A positive
    /// `zoom_delta` (scroll up) moves the camera closer.
    pub fn update(&mut self, pointer_delta: Vec2, zoom_delta: f32) {
        self.yaw = wrap_degrees(self.yaw + pointer_delta.x * self.sensitivity);
        self.pitch = (self.pitch - pointer_delta.y * self.sensitivity)
            .clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        self.distance = (self.distance - zoom_delta * self.zoom_step)
            .clamp(self.min_distance, self.max_distance);
    }

    /// World-space eye position.
    pub fn eye_position(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(
            self.distance * pitch.cos() * yaw.sin(),
            self.distance * pitch.sin(),
            self.distance * pitch.cos() * yaw.cos(),
        )
    }

    /// Right-handed look-at from the eye to the origin.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), Vec3::ZERO, Vec3::Y)
    }

    /// Perspective projection with reverse-Z (near maps to 1, far to 0).
    pub fn projection_matrix(&self) -> Mat4 {
        // Swapped near/far
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near)
    }

    /// Update the aspect ratio; zero-sized windows are ignored.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_tiny_negative_yaw_wraps_below_360() {
        let config = CameraConfig {
            yaw_degrees: 0.0,
            ..CameraConfig::default()
        };
        let mut camera = OrbitCamera::from_config(&config);
        camera.update(Vec2::new(-1e-7, 0.0), 0.0);
        assert!((0.0..360.0).contains(&camera.yaw()), "yaw = {}", camera.yaw());

        assert_eq!(wrap_degrees(-1e-7), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        let from_config = OrbitCamera::from_config(&CameraConfig {
            yaw_degrees: -1e-7,
            ..CameraConfig::default()
        });
        assert!(from_config.yaw() < 360.0);
    }

    #[test]
    fn test_golden_eye_position() {
        let camera = OrbitCamera::default();
        assert_eq!(camera.yaw(), 180.0);
        assert_eq!(camera.pitch(), 10.0);
        assert_eq!(camera.distance(), 80.0);

        let eye = camera.eye_position();
        assert!(eye.x.abs() < 1e-3, "x = {}", eye.x);
        assert!((eye.y - 13.892).abs() < 1e-2, "y = {}", eye.y);
        assert!((eye.z + 78.785).abs() < 1e-2, "z = {}", eye.z);
    }

    #[test]
    fn test_pitch_stays_clamped() {
        let mut camera = OrbitCamera::default();
        for _ in 0..100 {
            camera.update(Vec2::new(0.0, -500.0), 0.0);
            assert!(camera.pitch() <= OrbitCamera::PITCH_LIMIT);
        }
        assert_eq!(camera.pitch(), 89.0);
        for _ in 0..100 {
            camera.update(Vec2::new(0.0, 500.0), 0.0);
            assert!(camera.pitch() >= -OrbitCamera::PITCH_LIMIT);
        }
        assert_eq!(camera.pitch(), -89.0);
    }

    #[test]
    fn test_pointer_down_lowers_pitch() {
        let mut camera = OrbitCamera::default();
        camera.update(Vec2::new(0.0, 10.0), 0.0);
        assert!((camera.pitch() - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_yaw_wraps_into_range() {
        let mut camera = OrbitCamera::default();
        // 180 + 1000 * 0.2 = 380 -> 20
        camera.update(Vec2::new(1000.0, 0.0), 0.0);
        assert!((camera.yaw() - 20.0).abs() < 1e-3);

        // 20 - 250 * 0.2 = -30 -> 330
        camera.update(Vec2::new(-250.0, 0.0), 0.0);
        assert!((camera.yaw() - 330.0).abs() < 1e-3);
        assert!((0.0..360.0).contains(&camera.yaw()));
    }

    #[test]
    fn test_zoom_clamps_to_bounds() {
        let mut camera = OrbitCamera::default();
        camera.update(Vec2::ZERO, 1.0);
        assert_eq!(camera.distance(), 78.0);

        for _ in 0..100 {
            camera.update(Vec2::ZERO, 1.0);
        }
        assert_eq!(camera.distance(), 5.0);

        for _ in 0..100 {
            camera.update(Vec2::ZERO, -1.0);
        }
        assert_eq!(camera.distance(), 100.0);
    }

    #[test]
    fn test_view_matrix_puts_origin_in_front() {
        let camera = OrbitCamera::default();
        let origin_view = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(origin_view.x.abs() < 1e-3);
        assert!(origin_view.y.abs() < 1e-3);
        assert!((origin_view.z + camera.distance()).abs() < 1e-3);

        let eye_view = camera.view_matrix().transform_point3(camera.eye_position());
        assert!(eye_view.length() < 1e-3);
    }

    #[test]
    fn test_view_matrix_is_pure() {
        let camera = OrbitCamera::default();
        let before = camera.clone();
        let _ = camera.view_matrix();
        let _ = camera.view_matrix();
        assert_eq!(camera, before);
    }

    #[test]
    fn test_projection_is_reverse_z() {
        let mut camera = OrbitCamera::default();
        camera.set_aspect_ratio(900.0, 700.0);
        let proj = camera.projection_matrix();

        let near = proj * Vec4::new(0.0, 0.0, -0.1, 1.0);
        let far = proj * Vec4::new(0.0, 0.0, -500.0, 1.0);
        assert!((near.z / near.w - 1.0).abs() < 1e-4);
        assert!((far.z / far.w).abs() < 1e-4);
    }

    #[test]
    fn test_aspect_ratio_ignores_zero_size() {
        let mut camera = OrbitCamera::default();
        camera.set_aspect_ratio(1920.0, 1080.0);
        assert!((camera.aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);
        camera.set_aspect_ratio(1920.0, 0.0);
        assert!((camera.aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_inverted_bounds_are_sorted() {
        let config = CameraConfig {
            min_distance: 50.0,
            max_distance: 10.0,
            distance: 80.0,
            ..CameraConfig::default()
        };
        let camera = OrbitCamera::from_config(&config);
        assert_eq!(camera.distance(), 50.0);
    }
}
