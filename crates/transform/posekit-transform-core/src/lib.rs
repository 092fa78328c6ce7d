//! posekit-transform-core
//!
//! One canonical rigid-body [`Transform`] (3x3 rotation + translation) with
//! named conversions to and from each external encoding:
//!
//! - 4x4 homogeneous: [`Transform::from_matrix4`] / [`Transform::to_matrix4`]
//! - 3x3 + 3x1: [`Transform::from_rotation_translation`] /
//!   [`Transform::to_rotation_translation`]
//! - compact affine (3x4 row-major): [`Transform::from_affine`] /
//!   [`Transform::to_affine`]
//! - x, y, z, roll, pitch, yaw: [`Transform::from_angles_and_position`] /
//!   [`Transform::to_xyzrpy`]
//!
//! Only the angle factory guarantees an orthonormal rotation. The raw matrix
//! constructors copy what they are given and never validate it.

pub mod angles;
pub mod transform;

pub use angles::XyzRpy;
pub use transform::{Transform, DEFAULT_EPSILON};
