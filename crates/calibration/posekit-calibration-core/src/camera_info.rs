//! Camera calibration aggregate.

use nalgebra::{Matrix3, Matrix3x4, RowVector5, Vector3};
use posekit_transform_core::Transform;
use serde::{Deserialize, Serialize};

use crate::config::CalibrationConfig;

/// Image size, intrinsics and extrinsics of one camera.
///
/// Intrinsics follow the pinhole layout
/// `[[fx, 0, cx], [0, fy, cy], [0, 0, 1]]`; distortion is
/// `(k1, k2, p1, p2, k3)`. Values are stored as given and never validated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraInfo {
    pub width: u32,
    pub height: u32,
    pub camera_matrix: Matrix3<f64>,
    pub dist_coeffs: RowVector5<f64>,
    pub rectification: Matrix3<f64>,
    pub projection: Matrix3x4<f64>,
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

impl Default for CameraInfo {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            camera_matrix: Matrix3::identity(),
            dist_coeffs: RowVector5::zeros(),
            rectification: Matrix3::identity(),
            projection: Matrix3x4::identity(),
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }
}

impl CameraInfo {
    /// Defaults overridden by a validated config.
    pub fn from_config(cfg: &CalibrationConfig) -> Self {
        let mut info = Self::default();
        // validate() keeps both dimensions inside u32.
        info.width = u32::try_from(cfg.width).unwrap_or_default();
        info.height = u32::try_from(cfg.height).unwrap_or_default();
        if let Some(rows) = cfg.camera_matrix {
            info.camera_matrix = Matrix3::from_fn(|r, c| rows[r][c]);
        }
        if let Some(d) = cfg.dist_coeffs {
            info.dist_coeffs = RowVector5::from_row_slice(&d);
        }
        if let Some(rows) = cfg.rectification {
            info.rectification = Matrix3::from_fn(|r, c| rows[r][c]);
        }
        if let Some(rows) = cfg.projection {
            info.projection = Matrix3x4::from_fn(|r, c| rows[r][c]);
        }
        if let Some(rows) = cfg.rotation {
            info.rotation = Matrix3::from_fn(|r, c| rows[r][c]);
        }
        if let Some(t) = cfg.translation {
            info.translation = Vector3::from(t);
        }
        info
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    #[inline]
    pub fn fx(&self) -> f64 {
        self.camera_matrix[(0, 0)]
    }

    #[inline]
    pub fn fy(&self) -> f64 {
        self.camera_matrix[(1, 1)]
    }

    #[inline]
    pub fn cx(&self) -> f64 {
        self.camera_matrix[(0, 2)]
    }

    #[inline]
    pub fn cy(&self) -> f64 {
        self.camera_matrix[(1, 2)]
    }

    pub fn set_fx(&mut self, fx: f64) {
        self.camera_matrix[(0, 0)] = fx;
    }

    pub fn set_fy(&mut self, fy: f64) {
        self.camera_matrix[(1, 1)] = fy;
    }

    pub fn set_cx(&mut self, cx: f64) {
        self.camera_matrix[(0, 2)] = cx;
    }

    pub fn set_cy(&mut self, cy: f64) {
        self.camera_matrix[(1, 2)] = cy;
    }

    /// Extrinsic pose from the rotation matrix and translation vector, taken
    /// as-is.
    pub fn extrinsics(&self) -> Transform {
        Transform::from_rotation_translation(self.rotation, self.translation)
    }

    pub fn set_extrinsics(&mut self, pose: &Transform) {
        let (rotation, translation) = pose.to_rotation_translation();
        self.rotation = rotation;
        self.translation = translation;
    }
}
