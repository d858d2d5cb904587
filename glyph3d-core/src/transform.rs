/// 4x4 homogeneous transforms and accumulated Euler rotation state
use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};
use std::ops::Mul;

use crate::vector::Vec3;

/// Principal axis selector shared by model and camera rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Rotation state around three axes (in degrees), accumulated additively
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Add `degrees` to the angle of one axis
    pub fn rotate(&mut self, axis: Axis, degrees: f32) {
        match axis {
            Axis::X => self.x += degrees,
            Axis::Y => self.y += degrees,
            Axis::Z => self.z += degrees,
        }
    }

    /// `rotation_x(x) * rotation_y(y) * rotation_z(z)`
    pub fn to_transform(&self) -> Transform {
        Transform::rotation_x(self.x)
            * Transform::rotation_y(self.y)
            * Transform::rotation_z(self.z)
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// A 4x4 homogeneous transform.
///
/// Composition follows the column-vector convention: in `a * b * v`, `b` is
/// applied first. Values are never mutated after construction; composing
/// produces a new transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Matrix4<f32>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    pub fn from_matrix(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }

    pub fn translation(dx: f32, dy: f32, dz: f32) -> Self {
        Self::from_matrix(Matrix4::new_translation(&Vector3::new(dx, dy, dz)))
    }

    /// Right-handed rotation about X
    pub fn rotation_x(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        #[rustfmt::skip]
        let m = Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0,   c,  -s, 0.0,
            0.0,   s,   c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self::from_matrix(m)
    }

    /// Right-handed rotation about Y
    pub fn rotation_y(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        #[rustfmt::skip]
        let m = Matrix4::new(
              c, 0.0,   s, 0.0,
            0.0, 1.0, 0.0, 0.0,
             -s, 0.0,   c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self::from_matrix(m)
    }

    /// Right-handed rotation about Z
    pub fn rotation_z(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        #[rustfmt::skip]
        let m = Matrix4::new(
              c,  -s, 0.0, 0.0,
              s,   c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self::from_matrix(m)
    }

    pub fn rotation(axis: Axis, degrees: f32) -> Self {
        match axis {
            Axis::X => Self::rotation_x(degrees),
            Axis::Y => Self::rotation_y(degrees),
            Axis::Z => Self::rotation_z(degrees),
        }
    }

    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Self {
        Self::from_matrix(Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz)))
    }

    /// Embed a 3x3 linear block into a fresh transform with no translation,
    /// no perspective row and `1` in the bottom-right corner.
    pub fn from_linear_block(block: Matrix3<f32>) -> Self {
        Self::from_matrix(block.to_homogeneous())
    }

    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    /// Upper-left 3x3 block
    pub fn linear_block(&self) -> Matrix3<f32> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// Transpose of the linear block. Only an inverse when that block is
    /// orthonormal, i.e. a pure rotation without scale or shear.
    pub fn inverse_rotation(&self) -> Self {
        Self::from_linear_block(self.linear_block().transpose())
    }

    /// Transform a point through the full matrix.
    ///
    /// The result is divided by `w` unless `w == 0`, in which case the raw
    /// `xyz` is returned undivided.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let h = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        if h.w != 0.0 {
            Vec3::new(h.x / h.w, h.y / h.w, h.z / h.w)
        } else {
            Vec3::new(h.x, h.y, h.z)
        }
    }

    /// Transform a direction through the linear block only. Used for normals.
    pub fn transform_direction(&self, v: Vec3) -> Vec3 {
        (self.linear_block() * Vector3::from(v)).into()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        Transform::from_matrix(self.matrix * rhs.matrix)
    }
}

impl Mul<Vec3> for Transform {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform_point(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3, eps: f32) {
        assert!(
            (a - b).length() < eps,
            "expected {b:?}, got {a:?} (eps {eps})"
        );
    }

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        state.rotate(Axis::X, 10.0);
        state.rotate(Axis::Z, -20.0);
        state.rotate(Axis::X, 5.0);
        assert_eq!(state, RotationState::new(15.0, 0.0, -20.0));
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = RotationState::zero().to_transform();
        assert!((matrix.matrix() - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_right_handed_rotations() {
        let p = Transform::rotation_x(90.0) * Vec3::new(0.0, 1.0, 0.0);
        assert_close(p, Vec3::new(0.0, 0.0, 1.0), 1e-6);
        let p = Transform::rotation_y(90.0) * Vec3::new(0.0, 0.0, 1.0);
        assert_close(p, Vec3::new(1.0, 0.0, 0.0), 1e-6);
        let p = Transform::rotation_z(90.0) * Vec3::new(1.0, 0.0, 0.0);
        assert_close(p, Vec3::new(0.0, 1.0, 0.0), 1e-6);
    }

    #[test]
    fn test_rightmost_applies_first() {
        let t = Transform::translation(10.0, 0.0, 0.0);
        let r = Transform::rotation_z(90.0);
        let origin = Vec3::ZERO;
        // translate, then rotate
        assert_close((r * t) * origin, Vec3::new(0.0, 10.0, 0.0), 1e-5);
        // rotate, then translate
        assert_close((t * r) * origin, Vec3::new(10.0, 0.0, 0.0), 1e-5);
    }

    #[test]
    fn test_composition_is_associative() {
        let a = Transform::rotation_x(33.0) * Transform::translation(1.0, -2.0, 3.0);
        let b = Transform::scaling(2.0, 0.5, 1.5);
        let c = Transform::rotation_z(-71.0) * Transform::rotation_y(12.5);
        let p = Vec3::new(4.0, -7.0, 2.5);

        let left = ((a * b) * c) * p;
        let right = (a * (b * c)) * p;
        assert_close(left, right, 1e-4);
    }

    #[test]
    fn test_inverse_rotation_round_trip() {
        let rotations = [
            Transform::rotation_x(40.0),
            Transform::rotation_y(-125.0) * Transform::rotation_z(17.0),
            Transform::rotation_z(90.0) * Transform::rotation_x(180.0) * Transform::rotation_y(3.0),
        ];
        let v = Vec3::new(0.3, -1.7, 2.2);
        for r in rotations {
            let back = r.inverse_rotation().transform_direction(r.transform_direction(v));
            assert_close(back, v, 1e-5);
        }
    }

    #[test]
    fn test_direction_ignores_translation() {
        let t = Transform::translation(5.0, 6.0, 7.0) * Transform::scaling(2.0, 2.0, 2.0);
        let v = Vec3::new(1.0, 0.0, 0.0);
        assert_close(t.transform_direction(v), Vec3::new(2.0, 0.0, 0.0), 1e-6);
        assert_close(t.transform_point(v), Vec3::new(7.0, 6.0, 7.0), 1e-6);
    }

    #[test]
    fn test_perspective_divide() {
        let mut m = Matrix4::identity();
        m[(3, 2)] = 1.0;
        m[(3, 3)] = 0.0;
        let t = Transform::from_matrix(m);

        // w = z = 2: divided
        assert_close(t.transform_point(Vec3::new(4.0, 2.0, 2.0)), Vec3::new(2.0, 1.0, 1.0), 1e-6);
        // w = z = 0: left undivided
        assert_close(t.transform_point(Vec3::new(4.0, 2.0, 0.0)), Vec3::new(4.0, 2.0, 0.0), 1e-6);
    }

    #[test]
    fn test_from_linear_block_zeroes_translation() {
        let combined = Transform::translation(9.0, 9.0, 9.0) * Transform::rotation_y(30.0);
        let stripped = Transform::from_linear_block(combined.linear_block());
        let m = stripped.matrix();
        for i in 0..3 {
            assert_eq!(m[(i, 3)], 0.0);
            assert_eq!(m[(3, i)], 0.0);
        }
        assert_eq!(m[(3, 3)], 1.0);
        assert_close(stripped * Vec3::ZERO, Vec3::ZERO, 1e-6);
    }

    #[test]
    fn test_default_is_identity() {
        assert_eq!(Transform::default(), Transform::identity());
        assert_eq!(Transform::scaling(1.0, 1.0, 1.0), Transform::identity());
    }
}
