/// Camera and projection utilities
use crate::transform::{Axis, RotationState, Transform};
use crate::vector::Vec3;

/// Sentinel returned by single-point projection for points behind the camera
pub const OFF_SCREEN: ScreenPoint = ScreenPoint {
    x: -1000.0,
    y: -1000.0,
};

/// A point on the painting surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Camera pose: a position plus Euler angles accumulated per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: RotationState,
}

impl Camera {
    pub fn new(position: Vec3, rotation: RotationState) -> Self {
        Self { position, rotation }
    }

    pub fn rotate(&mut self, axis: Axis, degrees: f32) {
        self.rotation.rotate(axis, degrees);
    }

    /// Scene space to camera space: translate by `-position`, then rotate
    pub fn view_transform(&self) -> Transform {
        let p = self.position;
        self.rotation.to_transform() * Transform::translation(-p.x, -p.y, -p.z)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, -400.0), RotationState::zero())
    }
}

/// Perspective mapping from camera space to screen pixels.
///
/// `screen = v.xy * focal / (v.z + depth_offset) * base_scale * aspect + center`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub focal: f32,
    pub depth_offset: f32,
    pub reference_size: f32,
    pub auto_scale: bool,
    base_scale: f32,
    width: f32,
    height: f32,
}

impl Projection {
    pub fn new(
        focal: f32,
        depth_offset: f32,
        reference_size: f32,
        auto_scale: bool,
        base_scale: f32,
    ) -> Self {
        Self {
            focal,
            depth_offset,
            reference_size,
            auto_scale,
            base_scale,
            width: reference_size,
            height: reference_size,
        }
    }

    /// Record a new viewport size, rescaling when auto-scale is on
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
        if self.auto_scale {
            self.base_scale = self.width.min(self.height) / self.reference_size;
        }
    }

    pub fn base_scale(&self) -> f32 {
        self.base_scale
    }

    pub fn set_base_scale(&mut self, base_scale: f32) {
        self.base_scale = base_scale;
    }

    /// Horizontal and vertical squeeze keeping the letters' proportions on
    /// non-square viewports
    pub fn aspect_adjust(&self) -> (f32, f32) {
        let aspect = if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        };
        if aspect > 1.0 {
            (1.0 / aspect, 1.0)
        } else {
            (1.0, aspect)
        }
    }

    /// Project a camera-space point; `None` at or behind the camera plane
    pub fn project(&self, v: Vec3) -> Option<ScreenPoint> {
        if v.z <= 0.0 {
            return None;
        }
        let factor = self.focal / (v.z + self.depth_offset) * self.base_scale;
        let (ax, ay) = self.aspect_adjust();
        Some(ScreenPoint::new(
            v.x * factor * ax + self.width / 2.0,
            v.y * factor * ay + self.height / 2.0,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection(width: u32, height: u32) -> Projection {
        let mut projection = Projection::new(500.0, 300.0, 600.0, true, 2.0);
        projection.resize(width, height);
        projection
    }

    #[test]
    fn test_camera_creation() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, -400.0));
        assert_eq!(camera.rotation, RotationState::zero());
    }

    #[test]
    fn test_view_transform_moves_origin_in_front() {
        let camera = Camera::default();
        let v = camera.view_transform() * Vec3::ZERO;
        assert!((v - Vec3::new(0.0, 0.0, 400.0)).length() < 1e-4);
    }

    #[test]
    fn test_view_transform_translates_then_rotates() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, -10.0), RotationState::zero());
        camera.rotate(Axis::Y, 90.0);
        // (0,0,0) - position = (0,0,10), rotated +90 about Y -> (10,0,0)
        let v = camera.view_transform() * Vec3::ZERO;
        assert!((v - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_auto_scale() {
        let p = projection(800, 600);
        assert!((p.base_scale() - 1.0).abs() < 1e-6);
        let p = projection(1200, 1500);
        assert!((p.base_scale() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_fixed_scale_without_auto() {
        let mut p = Projection::new(500.0, 300.0, 600.0, false, 2.0);
        p.resize(300, 300);
        assert_eq!(p.base_scale(), 2.0);
    }

    #[test]
    fn test_center_projects_to_viewport_center() {
        let p = projection(800, 600);
        let s = p.project(Vec3::new(0.0, 0.0, 400.0)).unwrap();
        assert!((s.x - 400.0).abs() < 1e-4);
        assert!((s.y - 300.0).abs() < 1e-4);
    }

    #[test]
    fn test_behind_camera_is_rejected() {
        let p = projection(800, 600);
        assert!(p.project(Vec3::new(1.0, 1.0, 0.0)).is_none());
        assert!(p.project(Vec3::new(1.0, 1.0, -5.0)).is_none());
    }

    #[test]
    fn test_aspect_adjust() {
        assert_eq!(projection(800, 400).aspect_adjust(), (0.5, 1.0));
        assert_eq!(projection(400, 800).aspect_adjust(), (1.0, 0.5));
        assert_eq!(projection(500, 500).aspect_adjust(), (1.0, 1.0));
    }
}
