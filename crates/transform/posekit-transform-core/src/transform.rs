//! Rigid-body transform value type.

use std::fmt;
use std::ops::Mul;

use nalgebra::{
    Isometry3, Matrix3, Matrix4, Point3, Rotation3, Translation3, UnitQuaternion, Vector3,
};
use serde::{Deserialize, Serialize};

use crate::angles::XyzRpy;

/// Default tolerance for [`Transform::is_similar`] and [`Transform::is_identity`].
pub const DEFAULT_EPSILON: f64 = 1e-5;

/// Below this, cos(pitch) is treated as zero when extracting angles.
const GIMBAL_EPSILON: f64 = 1e-9;

/// Iteration cap for rotation projection; keeps degenerate or NaN input bounded.
const PROJECTION_MAX_ITER: usize = 100;

/// A rigid-body pose: rotation block `R` and translation `t` of the
/// homogeneous matrix
///
/// ```text
/// | R  t |
/// | 0  1 |
/// ```
///
/// The bottom row is implicit and always `[0, 0, 0, 1]`.
///
/// Transforms built with [`Transform::from_angles_and_position`] have an
/// orthonormal rotation. The raw constructors ([`Transform::from_matrix4`],
/// [`Transform::from_rotation_translation`], [`Transform::from_affine`]) copy
/// their input as-is and do not check it; use [`Transform::is_rigid`] when
/// the input is untrusted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "TransformRepr", into = "TransformRepr")]
pub struct Transform {
    rotation: Matrix3<f64>,
    translation: Vector3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

fn rot_x(a: f64) -> Matrix3<f64> {
    let (s, c) = a.sin_cos();
    #[rustfmt::skip]
    let m = Matrix3::new(
        1.0, 0.0, 0.0,
        0.0,   c,  -s,
        0.0,   s,   c,
    );
    m
}

fn rot_y(a: f64) -> Matrix3<f64> {
    let (s, c) = a.sin_cos();
    #[rustfmt::skip]
    let m = Matrix3::new(
          c, 0.0,   s,
        0.0, 1.0, 0.0,
         -s, 0.0,   c,
    );
    m
}

fn rot_z(a: f64) -> Matrix3<f64> {
    let (s, c) = a.sin_cos();
    #[rustfmt::skip]
    let m = Matrix3::new(
          c,  -s, 0.0,
          s,   c, 0.0,
        0.0, 0.0, 1.0,
    );
    m
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Translation `(x, y, z)`, rotation `Rz(yaw) · Ry(pitch) · Rx(roll)`:
    /// roll about X is applied first, then pitch about Y, then yaw about Z.
    pub fn from_angles_and_position(
        x: f64,
        y: f64,
        z: f64,
        roll: f64,
        pitch: f64,
        yaw: f64,
    ) -> Self {
        Self {
            rotation: rot_z(yaw) * rot_y(pitch) * rot_x(roll),
            translation: Vector3::new(x, y, z),
        }
    }

    pub fn from_xyzrpy(v: XyzRpy) -> Self {
        Self::from_angles_and_position(v.x, v.y, v.z, v.roll, v.pitch, v.yaw)
    }

    /// Copy the upper 3x4 block of `m`. The bottom row is ignored.
    pub fn from_matrix4(m: &Matrix4<f64>) -> Self {
        Self {
            rotation: m.fixed_view::<3, 3>(0, 0).into_owned(),
            translation: m.fixed_view::<3, 1>(0, 3).into_owned(),
        }
    }

    /// Row-major 4x4 array form of [`Transform::from_matrix4`].
    pub fn from_rows4(rows: &[[f64; 4]; 4]) -> Self {
        Self::from_matrix4(&Matrix4::from_fn(|r, c| rows[r][c]))
    }

    pub fn from_rotation_translation(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Compact affine form: the 3x4 `[R | t]` block, row-major.
    pub fn from_affine(a: &[f64; 12]) -> Self {
        Self {
            rotation: Matrix3::from_fn(|r, c| a[r * 4 + c]),
            translation: Vector3::new(a[3], a[7], a[11]),
        }
    }

    pub fn from_isometry(iso: &Isometry3<f64>) -> Self {
        Self {
            rotation: iso.rotation.to_rotation_matrix().into_inner(),
            translation: iso.translation.vector,
        }
    }

    #[inline]
    pub fn rotation(&self) -> Matrix3<f64> {
        self.rotation
    }

    #[inline]
    pub fn translation(&self) -> Vector3<f64> {
        self.translation
    }

    pub fn to_matrix4(&self) -> Matrix4<f64> {
        let mut m = Matrix4::identity();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.rotation);
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.translation);
        m
    }

    pub fn to_rows4(&self) -> [[f64; 4]; 4] {
        let m = self.to_matrix4();
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = m[(r, c)];
            }
        }
        rows
    }

    pub fn to_rotation_translation(&self) -> (Matrix3<f64>, Vector3<f64>) {
        (self.rotation, self.translation)
    }

    pub fn to_affine(&self) -> [f64; 12] {
        let mut a = [0.0; 12];
        for r in 0..3 {
            for c in 0..3 {
                a[r * 4 + c] = self.rotation[(r, c)];
            }
            a[r * 4 + 3] = self.translation[r];
        }
        a
    }

    /// Recover position and ZYX angles. Roll and yaw lie in `(-π, π]`, pitch in
    /// `[-π/2, π/2]`. At pitch = ±π/2 roll is reported as 0 and the combined
    /// rotation is carried by yaw. Meaningful only for orthonormal rotations.
    pub fn to_xyzrpy(&self) -> XyzRpy {
        let r = &self.rotation;
        let cos_pitch = (r[(2, 1)] * r[(2, 1)] + r[(2, 2)] * r[(2, 2)]).sqrt();
        let pitch = (-r[(2, 0)]).atan2(cos_pitch);
        let (roll, yaw) = if cos_pitch > GIMBAL_EPSILON {
            (r[(2, 1)].atan2(r[(2, 2)]), r[(1, 0)].atan2(r[(0, 0)]))
        } else {
            (0.0, (-r[(0, 1)]).atan2(r[(1, 1)]))
        };
        let t = &self.translation;
        XyzRpy::new(t.x, t.y, t.z, roll, pitch, yaw)
    }

    /// Nearest proper rigid transform (rotation re-orthonormalized).
    pub fn to_isometry(&self) -> Isometry3<f64> {
        let rotation = UnitQuaternion::from_rotation_matrix(&self.nearest_rotation());
        Isometry3::from_parts(Translation3::from(self.translation), rotation)
    }

    /// Same translation, rotation projected onto the nearest orthonormal matrix.
    pub fn orthonormalized(&self) -> Self {
        Self {
            rotation: self.nearest_rotation().into_inner(),
            translation: self.translation,
        }
    }

    fn nearest_rotation(&self) -> Rotation3<f64> {
        Rotation3::from_matrix_eps(
            &self.rotation,
            f64::EPSILON,
            PROJECTION_MAX_ITER,
            Rotation3::identity(),
        )
    }

    #[inline]
    pub fn rotation_determinant(&self) -> f64 {
        self.rotation.determinant()
    }

    /// Largest element-wise absolute difference between the 4x4 forms.
    /// The bottom rows always agree, so only the 3x4 blocks are compared.
    pub fn max_abs_diff(&self, other: &Transform) -> f64 {
        let dr = (self.rotation - other.rotation).amax();
        let dt = (self.translation - other.translation).amax();
        dr.max(dt)
    }

    /// True when no element of the 4x4 forms differs by more than `eps`.
    pub fn is_similar(&self, other: &Transform, eps: f64) -> bool {
        self.max_abs_diff(other) <= eps
    }

    pub fn is_similar_default(&self, other: &Transform) -> bool {
        self.is_similar(other, DEFAULT_EPSILON)
    }

    pub fn is_identity(&self, eps: f64) -> bool {
        self.is_similar(&Self::identity(), eps)
    }

    pub fn is_identity_default(&self) -> bool {
        self.is_identity(DEFAULT_EPSILON)
    }

    /// Whether the rotation block is orthonormal with determinant +1, to `eps`.
    pub fn is_rigid(&self, eps: f64) -> bool {
        self.is_similar(&self.orthonormalized(), eps)
            && (self.rotation_determinant() - 1.0).abs() <= eps
    }

    /// Rigid inverse `[Rᵀ | -Rᵀt]`. Only an exact inverse when the rotation is orthonormal.
    pub fn inverse(&self) -> Self {
        let rt = self.rotation.transpose();
        Self {
            rotation: rt,
            translation: -(rt * self.translation),
        }
    }

    pub fn transform_point(&self, p: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation * p.coords + self.translation)
    }

    pub fn transform_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * v
    }
}

impl Mul for Transform {
    type Output = Transform;

    /// `self * rhs` applies `rhs` first, then `self`.
    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            rotation: self.rotation * rhs.rotation,
            translation: self.rotation * rhs.translation + self.translation,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.to_rows4();
        for (i, row) in rows.iter().enumerate() {
            write!(
                f,
                "[{:>12.6} {:>12.6} {:>12.6} {:>12.6}]",
                row[0], row[1], row[2], row[3]
            )?;
            if i < 3 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// ----- serde representation -----

#[derive(Clone, Copy, Serialize, Deserialize)]
struct TransformRepr {
    rotation: [[f64; 3]; 3],
    translation: [f64; 3],
}

impl From<TransformRepr> for Transform {
    fn from(r: TransformRepr) -> Self {
        Self {
            rotation: Matrix3::from_fn(|i, j| r.rotation[i][j]),
            translation: Vector3::from(r.translation),
        }
    }
}

impl From<Transform> for TransformRepr {
    fn from(t: Transform) -> Self {
        let mut rotation = [[0.0; 3]; 3];
        for (i, row) in rotation.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = t.rotation[(i, j)];
            }
        }
        Self {
            rotation,
            translation: [t.translation.x, t.translation.y, t.translation.z],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn elementary_rotations_match_right_hand_rule() {
        // +90° about Z takes X to Y.
        let t = Transform::from_angles_and_position(0.0, 0.0, 0.0, 0.0, 0.0, FRAC_PI_2);
        let v = t.transform_vector(&Vector3::x());
        assert_relative_eq!(v, Vector3::y(), epsilon = 1e-12);

        // +90° about X takes Y to Z.
        let t = Transform::from_angles_and_position(0.0, 0.0, 0.0, FRAC_PI_2, 0.0, 0.0);
        let v = t.transform_vector(&Vector3::y());
        assert_relative_eq!(v, Vector3::z(), epsilon = 1e-12);

        // +90° about Y takes Z to X.
        let t = Transform::from_angles_and_position(0.0, 0.0, 0.0, 0.0, FRAC_PI_2, 0.0);
        let v = t.transform_vector(&Vector3::z());
        assert_relative_eq!(v, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn angle_factory_is_orthonormal() {
        let t = Transform::from_angles_and_position(1.0, 2.0, 3.0, 0.3, -0.7, 2.1);
        assert_relative_eq!(t.rotation_determinant(), 1.0, epsilon = 1e-12);
        assert!(t.is_rigid(1e-9));
    }

    #[test]
    fn gimbal_lock_keeps_the_combined_rotation() {
        let t = Transform::from_angles_and_position(0.0, 0.0, 0.0, 0.4, FRAC_PI_2, 0.1);
        let a = t.to_xyzrpy();
        assert_relative_eq!(a.pitch, FRAC_PI_2, epsilon = 1e-9);
        assert_eq!(a.roll, 0.0);
        let back = Transform::from_xyzrpy(a);
        assert!(back.is_similar(&t, 1e-9));
    }

    #[test]
    fn display_prints_four_rows() {
        let text = Transform::identity().to_string();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().last().unwrap().ends_with("1.000000]"));
    }
}
